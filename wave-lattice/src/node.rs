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
//! Lattice nodes
//!
//! A [`Node`] is plain data: position, velocity, mass, role, and a derived
//! display intensity. Renderers read nodes through the lattice and copy
//! whatever they need into their own meshes; nothing here aliases render state.
//!
//! The update rule is a single [`Node::apply_step`] that branches on role:
//!
//! | Role                 | Update                                          |
//! |----------------------|-------------------------------------------------|
//! | `Static`             | none                                            |
//! | `Driven`             | `y = amplitude * sin(t / period)`               |
//! | `Free` / `Boundary`  | force model, then Euler integration             |

use crate::components::{Mass, Position, Role, Velocity};
use crate::config::{DriveConfig, PhysicsConfig};
use crate::force::ForceModel;
use crate::integration::EulerIntegrator;

/// Displacement at which the display intensity saturates
const INTENSITY_SATURATION: f64 = 2.0;

/// Prescribed sinusoidal motion of the driven node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Peak displacement
    pub amplitude: f64,
    /// Time scaling constant
    pub period: f64,
}

impl Oscillator {
    /// Create an oscillator
    pub fn new(amplitude: f64, period: f64) -> Self {
        Oscillator { amplitude, period }
    }

    /// Build the oscillator described by a drive configuration
    pub fn from_config(config: &DriveConfig) -> Self {
        Oscillator::new(config.amplitude, config.period)
    }

    /// Vertical displacement at simulation time `t`
    pub fn displacement_at(&self, sim_time: f64) -> f64 {
        self.amplitude * (sim_time / self.period).sin()
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator::from_config(&DriveConfig::default())
    }
}

/// Everything needed to step a node besides its own state and neighbors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dynamics {
    /// Force model for integrated nodes
    pub forces: ForceModel,
    /// Integrator for integrated nodes
    pub integrator: EulerIntegrator,
    /// Motion of the driven node
    pub drive: Oscillator,
}

impl Dynamics {
    /// Build dynamics from validated configuration sections
    pub fn from_config(physics: &PhysicsConfig, drive: &DriveConfig) -> Self {
        Dynamics {
            forces: ForceModel::from_config(physics),
            integrator: EulerIntegrator::from_config(physics),
            drive: Oscillator::from_config(drive),
        }
    }
}

/// A single point mass in the lattice
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: Position,
    velocity: Velocity,
    mass: Mass,
    role: Role,
    intensity: f64,
}

impl Node {
    /// Create a node at rest
    pub fn new(position: Position, mass: Mass, role: Role) -> Self {
        Node {
            position,
            velocity: Velocity::zero(),
            mass,
            role,
            intensity: intensity_for(position.y()),
        }
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Role assigned at construction
    pub fn role(&self) -> Role {
        self.role
    }

    /// Display intensity in `[0, 1]`, derived from the vertical displacement
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Display color for the current displacement
    pub fn color(&self) -> Rgb {
        Rgb::from_intensity(self.intensity)
    }

    /// Whether position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid()
    }

    /// Advance this node by one tick
    ///
    /// `neighbors` holds the snapshot positions of the live (non-static)
    /// neighbors; it is ignored by static and driven nodes.
    pub fn apply_step(&mut self, neighbors: &[Position], sim_time: f64, dynamics: &Dynamics) {
        if self.role == Role::Static {
            return;
        }

        match self.role {
            Role::Driven => {
                self.position.set_y(dynamics.drive.displacement_at(sim_time));
            }
            Role::Static => {}
            Role::Free | Role::Boundary => {
                let force = dynamics.forces.net_force(
                    &self.position,
                    &self.velocity,
                    self.mass,
                    neighbors,
                );
                dynamics.integrator.integrate(
                    &mut self.position,
                    &mut self.velocity,
                    self.mass,
                    force,
                );
            }
        }
        self.intensity = intensity_for(self.position.y());
    }

    pub(crate) fn set_displacement(&mut self, y: f64) {
        self.position.set_y(y);
        self.intensity = intensity_for(y);
    }

    pub(crate) fn add_vertical_velocity(&mut self, dy: f64) {
        self.velocity.set_dy(self.velocity.dy() + dy);
    }
}

fn intensity_for(y: f64) -> f64 {
    (y.abs() / INTENSITY_SATURATION).clamp(0.0, 1.0)
}

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Gray level linearly interpolated from black (0) to white (1)
    pub fn from_intensity(intensity: f64) -> Self {
        let level = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb {
            r: level,
            g: level,
            b: level,
        }
    }
}
