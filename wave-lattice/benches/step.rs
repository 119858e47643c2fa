// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for lattice stepping
//!
//! These benchmarks measure:
//! - Tick throughput for different lattice sizes
//! - Sequential versus row-parallel update passes
//! - Cost of the force model alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wave_lattice::{
    ForceModel, Lattice, Mass, Position, SimulationClock, SimulationConfig, UpdateOrder, Velocity,
};

// Square lattice with the reference layout scaled to `size`
fn setup_lattice(size: usize) -> Lattice {
    let mut config = SimulationConfig::default();
    config.lattice.width = size;
    config.lattice.height = size;
    config.lattice.wall_column = size / 2;
    config.lattice.slit_center_row = size / 2;
    config.lattice.slit_size = (size * 15 / 100).max(1);
    config.lattice.driven_row = size / 2;
    config.lattice.driven_column = 0;
    config.warn_on_invalid = false;
    Lattice::from_config(&config).unwrap()
}

// Let the wave fill part of the lattice so nodes are not all at rest
fn warm_up(lattice: &mut Lattice, clock: &mut SimulationClock, ticks: usize) {
    for _ in 0..ticks {
        let t = clock.advance();
        lattice.step(t);
    }
}

fn bench_step_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_throughput");

    for size in [50, 100, 200].iter() {
        group.throughput(Throughput::Elements((*size * *size) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, &size| {
            let mut lattice = setup_lattice(size);
            let mut clock = SimulationClock::default();
            warm_up(&mut lattice, &mut clock, 100);

            b.iter(|| {
                let t = clock.advance();
                lattice.step_sequential(black_box(t), UpdateOrder::Forward);
            });
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, &size| {
            let mut lattice = setup_lattice(size);
            let mut clock = SimulationClock::default();
            warm_up(&mut lattice, &mut clock, 100);

            b.iter(|| {
                let t = clock.advance();
                lattice.step_parallel(black_box(t));
            });
        });
    }

    group.finish();
}

fn bench_force_model(c: &mut Criterion) {
    let model = ForceModel::default();
    let position = Position::new(0.0, 1.25, 0.0);
    let velocity = Velocity::vertical(-0.3);
    let mass = Mass::new(1.0);
    let neighbors = [
        Position::new(5.0, 1.0, 0.0),
        Position::new(-5.0, 0.5, 0.0),
        Position::new(0.0, 2.0, 5.0),
        Position::new(0.0, 0.0, -5.0),
    ];

    c.bench_function("net_force_four_neighbors", |b| {
        b.iter(|| {
            model.net_force(
                black_box(&position),
                black_box(&velocity),
                black_box(mass),
                black_box(&neighbors),
            )
        });
    });
}

fn bench_reference_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_run");
    group.sample_size(10);

    group.bench_function("reference_100_ticks", |b| {
        b.iter(|| {
            let mut lattice = Lattice::from_config(&SimulationConfig::default()).unwrap();
            let mut clock = SimulationClock::default();
            warm_up(&mut lattice, &mut clock, 100);
            black_box(lattice.kinetic_energy())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_step_throughput, bench_force_model, bench_reference_run);
criterion_main!(benches);
