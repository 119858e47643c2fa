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
//! Integration tests for the physical invariants of the lattice
//!
//! Static nodes never move, the source follows its prescribed motion exactly,
//! motion stays on the vertical axis, and the result of a tick does not
//! depend on the order nodes are visited in.

use wave_lattice::{
    Lattice, Node, Role, SimulationClock, SimulationConfig, UpdateOrder, Velocity,
};

fn reference() -> Lattice {
    Lattice::from_config(&SimulationConfig::default()).unwrap()
}

/// A smaller lattice with the same layout rules, for faster runs
fn small_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.lattice.width = 30;
    config.lattice.height = 24;
    config.lattice.slit_size = 5;
    config.lattice.slit_center_row = 12;
    config.lattice.wall_column = 15;
    config.lattice.driven_row = 12;
    config.lattice.driven_column = 0;
    config
}

fn run(lattice: &mut Lattice, ticks: u64) {
    let mut clock = SimulationClock::default();
    for _ in 0..ticks {
        let t = clock.advance();
        lattice.step(t);
    }
}

#[test]
fn test_static_nodes_never_change() {
    let mut lattice = reference();
    let walls: Vec<(usize, Node)> = lattice
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.role() == Role::Static)
        .map(|(i, node)| (i, node.clone()))
        .collect();
    assert!(!walls.is_empty());

    run(&mut lattice, 300);

    for (index, before) in &walls {
        let after = &lattice.nodes()[*index];
        assert_eq!(after.position(), before.position());
        assert_eq!(after.velocity(), before.velocity());
    }
}

#[test]
fn test_driven_node_follows_prescribed_motion() {
    let mut lattice = reference();
    let (row, col) = lattice.driven_cell();
    let mut clock = SimulationClock::default();

    for _ in 0..400 {
        let t = clock.advance();
        lattice.step(t);

        let expected = 50.0 * (t / 200.0).sin();
        let y = lattice.node_at(row, col).unwrap().position().y();
        assert!((y - expected).abs() < 1e-12, "t = {}: {} != {}", t, y, expected);
    }
}

#[test]
fn test_driven_node_ignores_displaced_neighbors() {
    let mut config = small_config();
    config.drive.amplitude = 3.0;
    let mut lattice = Lattice::from_config(&config).unwrap();
    lattice.set_displacement(12, 1, 40.0).unwrap();
    lattice.set_displacement(11, 0, -40.0).unwrap();
    lattice.set_displacement(13, 0, -40.0).unwrap();

    lattice.step(100.0);

    let y = lattice.node_at(12, 0).unwrap().position().y();
    assert!((y - 3.0 * 0.5_f64.sin()).abs() < 1e-12);
}

#[test]
fn test_motion_constrained_to_vertical_axis() {
    let mut lattice = reference();
    let rest: Vec<_> = lattice.nodes().iter().map(Node::position).collect();

    run(&mut lattice, 300);

    for (node, start) in lattice.nodes().iter().zip(&rest) {
        assert_eq!(node.position().x(), start.x());
        assert_eq!(node.position().z(), start.z());
        if node.role().is_integrated() {
            assert_eq!(node.velocity().dx(), 0.0);
            assert_eq!(node.velocity().dz(), 0.0);
        }
    }
    assert!(lattice.max_displacement() > 0.0);
}

#[test]
fn test_update_order_does_not_matter() {
    let mut forward = Lattice::from_config(&small_config()).unwrap();
    forward.set_displacement(5, 5, 2.0).unwrap();
    forward.set_displacement(6, 5, -1.0).unwrap();
    forward.apply_impulse(12, 20, 0.5).unwrap();
    let mut reverse = forward.clone();

    let mut clock = SimulationClock::default();
    for _ in 0..60 {
        let t = clock.advance();
        forward.step_sequential(t, UpdateOrder::Forward);
        reverse.step_sequential(t, UpdateOrder::Reverse);
        assert_eq!(forward.nodes(), reverse.nodes());
    }
}

#[test]
fn test_flat_lattice_stays_at_rest() {
    let mut config = SimulationConfig::default();
    config.drive.amplitude = 0.0;
    config.physics.gravity = 0.0;
    let mut lattice = Lattice::from_config(&config).unwrap();

    run(&mut lattice, 200);

    for node in lattice.nodes() {
        assert_eq!(node.position().y(), 0.0);
        assert_eq!(node.velocity(), Velocity::zero());
        assert_eq!(node.intensity(), 0.0);
    }
    assert_eq!(lattice.kinetic_energy(), 0.0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut first = Lattice::from_config(&small_config()).unwrap();
    let mut second = Lattice::from_config(&small_config()).unwrap();

    run(&mut first, 250);
    run(&mut second, 250);

    assert_eq!(first.nodes(), second.nodes());
}

#[test]
fn test_restoring_term_pulls_toward_zero() {
    let mut config = small_config();
    config.drive.amplitude = 0.0;
    config.physics.gravity = 0.05;
    let mut lattice = Lattice::from_config(&config).unwrap();

    // Lift an entire free row segment so springs within it cancel
    for col in 1..15 {
        lattice.set_displacement(5, col, 1.0).unwrap();
    }
    let mut without_gravity = {
        let mut config = config.clone();
        config.physics.gravity = 0.0;
        Lattice::from_config(&config).unwrap()
    };
    for col in 1..15 {
        without_gravity.set_displacement(5, col, 1.0).unwrap();
    }

    lattice.step(0.0);
    without_gravity.step(0.0);

    let pulled = lattice.node_at(5, 7).unwrap().position().y();
    let free = without_gravity.node_at(5, 7).unwrap().position().y();
    assert!((free - pulled - 0.05).abs() < 1e-12);
}

#[test]
fn test_floor_clamp_keeps_nodes_above_zero() {
    let mut config = small_config();
    config.physics.floor_clamp = true;
    let mut lattice = Lattice::from_config(&config).unwrap();

    run(&mut lattice, 300);

    for node in lattice.nodes().iter().filter(|n| n.role().is_integrated()) {
        assert!(node.position().y() >= 0.0);
    }
    assert!(lattice.max_displacement() > 0.0);
}

#[test]
fn test_velocity_clamp_caps_speed() {
    let mut config = small_config();
    config.physics.velocity_clamp = Some(0.2);
    let mut lattice = Lattice::from_config(&config).unwrap();

    run(&mut lattice, 300);

    for node in lattice.nodes() {
        assert!(node.velocity().dy().abs() <= 0.2);
    }
}
