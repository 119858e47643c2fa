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
//! Slit Diffraction Example
//!
//! Drives the reference lattice and prints the wave field as an ASCII
//! intensity map, the same black-to-white mapping a renderer would use.
//!
//! # Running
//!
//! ```bash
//! # Reference configuration, 600 ticks
//! cargo run --example slit_diffraction --release
//!
//! # Longer run with a custom configuration file
//! cargo run --example slit_diffraction --release -- --ticks 1500 --config run.json
//!
//! # Print the default configuration as JSON
//! cargo run --example slit_diffraction -- --dump-config
//! ```

use std::process;
use wave_lattice::{Lattice, Role, Simulation, SimulationConfig};

/// Characters from dark to bright
const SHADES: &[u8] = b" .:-=+*#%@";

/// Print every `STRIDE`th row and column so the map fits a terminal
const STRIDE: usize = 2;

fn render(lattice: &Lattice) -> String {
    let mut out = String::new();
    for (row, nodes) in lattice.rows().enumerate().step_by(STRIDE) {
        for node in nodes.iter().step_by(STRIDE) {
            let ch = match node.role() {
                Role::Static => '|',
                Role::Driven => 'O',
                Role::Free | Role::Boundary => {
                    let level = node.intensity() * (SHADES.len() - 1) as f64;
                    SHADES[level.round() as usize] as char
                }
            };
            out.push(ch);
        }
        if lattice.slit_rows().contains(&row) {
            out.push_str("  <");
        }
        out.push('\n');
    }
    out
}

fn main() {
    env_logger::init();

    let mut ticks: u64 = 600;
    let mut config = SimulationConfig::default();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                match args.get(i + 1).map(|s| s.parse::<u64>()) {
                    Some(Ok(n)) => ticks = n,
                    _ => {
                        eprintln!("Error: --ticks requires a non-negative integer");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --config requires a path");
                    process::exit(1);
                };
                let loaded = std::fs::read_to_string(path)
                    .map_err(|e| e.to_string())
                    .and_then(|text| {
                        SimulationConfig::from_json_str(&text).map_err(|e| e.to_string())
                    });
                match loaded {
                    Ok(c) => config = c,
                    Err(e) => {
                        eprintln!("Error: could not load {}: {}", path, e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--dump-config" => match config.to_json_string() {
                Ok(text) => {
                    println!("{}", text);
                    return;
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut sim = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("Wave Lattice - Slit Diffraction");
    println!("===============================\n");
    let lattice = sim.lattice();
    println!(
        "Lattice {}x{}, wall at column {}, slit rows {:?}, source at {:?}",
        lattice.width(),
        lattice.height(),
        lattice.wall_column(),
        lattice.slit_rows(),
        lattice.driven_cell()
    );
    println!("Running {} ticks...\n", ticks);

    sim.run(ticks);

    let lattice = sim.lattice();
    print!("{}", render(lattice));
    println!();
    println!("t = {:.1}", sim.clock().time());
    println!("Kinetic energy:   {:.4}", lattice.kinetic_energy());
    println!("Max displacement: {:.4}", lattice.max_displacement());
}
