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
//! Explicit Euler integration constrained to the vertical axis
//!
//! Each integrated node advances as
//!
//! ```text
//! a  = F / m
//! v' = v + a*dt
//! v' = (0, v'.y, 0)            motion has one degree of freedom
//! p' = p + v'*dt
//! ```
//!
//! The reference update uses `dt = 1`, i.e. one unit per tick with no
//! physical time scaling. Since multiplying by `1.0` is exact, that default
//! reproduces the per-tick update bit for bit. Any other timestep turns this
//! into the continuous-time variant where acceleration and displacement are
//! scaled by `dt`.
//!
//! Two optional safeguards are off by default: a speed clamp applied after
//! projection, and a floor at `y = 0` that stops nodes on contact.

use crate::components::{Mass, Position, Velocity};
use crate::config::PhysicsConfig;
use crate::force::Force;

/// Semi-implicit Euler integrator for single-axis motion
///
/// # Example
///
/// ```
/// use wave_lattice::{EulerIntegrator, Force, Mass, Position, Velocity};
///
/// let integrator = EulerIntegrator::unit();
/// let mut position = Position::new(5.0, 0.0, 5.0);
/// let mut velocity = Velocity::zero();
///
/// integrator.integrate(&mut position, &mut velocity, Mass::new(1.0), Force::new(3.0, 1.0, 0.0));
///
/// assert_eq!(velocity, Velocity::vertical(1.0));
/// assert_eq!(position, Position::new(5.0, 1.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerIntegrator {
    timestep: f64,
    velocity_clamp: Option<f64>,
    floor_clamp: bool,
}

impl EulerIntegrator {
    /// Create a new integrator with the given timestep
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f64) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        EulerIntegrator {
            timestep,
            velocity_clamp: None,
            floor_clamp: false,
        }
    }

    /// The reference per-tick integrator (`dt = 1`)
    pub fn unit() -> Self {
        EulerIntegrator::new(1.0)
    }

    /// Build the integrator described by a validated physics configuration
    pub fn from_config(config: &PhysicsConfig) -> Self {
        EulerIntegrator::new(config.timestep)
            .with_velocity_clamp(config.velocity_clamp)
            .with_floor_clamp(config.floor_clamp)
    }

    /// Cap node speed at `max` after each update
    pub fn with_velocity_clamp(mut self, max: Option<f64>) -> Self {
        self.velocity_clamp = max;
        self
    }

    /// Enable or disable the floor at y = 0
    pub fn with_floor_clamp(mut self, enabled: bool) -> Self {
        self.floor_clamp = enabled;
        self
    }

    /// Get the timestep
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Get the speed cap, if any
    pub fn velocity_clamp(&self) -> Option<f64> {
        self.velocity_clamp
    }

    /// Whether the floor at y = 0 is active
    pub fn floor_clamp(&self) -> bool {
        self.floor_clamp
    }

    /// Advance one node by one step under the given net force
    pub fn integrate(
        &self,
        position: &mut Position,
        velocity: &mut Velocity,
        mass: Mass,
        force: Force,
    ) {
        let dt = self.timestep;
        let inv_mass = mass.inverse();

        // Horizontal force components are discarded by the projection below
        velocity.set_dy(velocity.dy() + force.fy * inv_mass * dt);
        velocity.project_vertical();

        if let Some(max) = self.velocity_clamp {
            velocity.set_dy(velocity.dy().clamp(-max, max));
        }

        position.set_y(position.y() + velocity.dy() * dt);

        if self.floor_clamp && position.y() < 0.0 {
            position.set_y(0.0);
            velocity.set_dy(0.0);
        }
    }
}

impl Default for EulerIntegrator {
    fn default() -> Self {
        EulerIntegrator::unit()
    }
}
