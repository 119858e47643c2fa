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
//! # Wave Lattice
//!
//! A deterministic simulator for a 2D lattice of point masses coupled to their
//! grid neighbors by vertical springs. A wall column with a slit blocks the
//! lattice, a driven node launches waves from the left edge, and the waves
//! diffract through the slit and interfere across the right half.
//!
//! ## Features
//!
//! - **Closed role set**: every node is `Free`, `Static`, `Driven` or `Boundary`
//! - **Snapshot stepping**: every tick reads a frozen copy of all positions, so
//!   update order never changes the result
//! - **Parallelization**: optional Rayon integration partitions the update pass by row
//! - **Configurable**: serde-backed configuration with the reference values as defaults
//!
//! ## Example
//!
//! ```rust
//! use wave_lattice::{Lattice, Role, SimulationClock};
//!
//! let mut lattice = Lattice::create(20, 20, 5.0, 5, 10, 10, 10, 0).unwrap();
//! let mut clock = SimulationClock::default();
//!
//! for _ in 0..10 {
//!     let t = clock.advance();
//!     lattice.step(t);
//! }
//!
//! assert_eq!(lattice.node_at(0, 10).unwrap().role(), Role::Static);
//! assert!(lattice.node_at(10, 1).unwrap().position().y() != 0.0);
//! ```

#![warn(missing_docs)]

/// Position, velocity, mass and role primitives
pub mod components;

/// Simulation configuration with reference defaults
pub mod config;

/// Error types
pub mod error;

/// Spring, friction and restoring force model
pub mod force;

/// Explicit Euler integration for single-axis motion
pub mod integration;

/// Lattice nodes and the prescribed drive
pub mod node;

/// Lattice construction, topology and stepping
pub mod lattice;

/// Fixed-increment driving clock
pub mod clock;

pub use clock::{Simulation, SimulationClock};
pub use components::{Mass, Position, Role, Velocity};
pub use config::{DriveConfig, LatticeConfig, PhysicsConfig, SimulationConfig};
pub use error::{LatticeError, Result};
pub use force::{Force, ForceModel};
pub use integration::EulerIntegrator;
pub use lattice::{Lattice, UpdateOrder};
pub use node::{Dynamics, Node, Oscillator, Rgb};
