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
//! Force model for lattice nodes
//!
//! The net force on an integrated node is the sum of three terms:
//!
//! ```text
//! spring    = Σ (0, -k (p.y - n_i.y), 0)      over live neighbors n_i
//! friction  = -v̂ * (k_f |v|²)                 zero when v = 0
//! restoring = (0, -m g p.y, 0)
//! ```
//!
//! Neighbor positions always come from the tick snapshot, never from nodes
//! that have already been updated this tick.

use crate::components::{Mass, Position, Velocity};
use crate::config::PhysicsConfig;

/// Represents a 3D force vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Force {
    /// X component
    pub fx: f64,
    /// Y component
    pub fy: f64,
    /// Z component
    pub fz: f64,
}

impl Force {
    /// Create a new force vector
    pub fn new(fx: f64, fy: f64, fz: f64) -> Self {
        Force { fx, fy, fz }
    }

    /// Create a zero force
    pub fn zero() -> Self {
        Force::new(0.0, 0.0, 0.0)
    }

    /// Check if the force is valid (all components finite)
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fy.is_finite() && self.fz.is_finite()
    }

    /// Add another force to this one
    pub fn add(&mut self, other: &Force) {
        self.fx += other.fx;
        self.fy += other.fy;
        self.fz += other.fz;
    }

    /// Get the magnitude of the force
    pub fn magnitude(&self) -> f64 {
        (self.fx * self.fx + self.fy * self.fy + self.fz * self.fz).sqrt()
    }
}

/// Stateless force computation for a single node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    /// Hooke constant of the vertical springs
    pub spring_constant: f64,
    /// Quadratic drag coefficient
    pub friction_constant: f64,
    /// Restoring coefficient pulling toward y = 0
    pub gravity: f64,
}

impl ForceModel {
    /// Create a force model from explicit constants
    pub fn new(spring_constant: f64, friction_constant: f64, gravity: f64) -> Self {
        ForceModel {
            spring_constant,
            friction_constant,
            gravity,
        }
    }

    /// Build the force model described by a physics configuration
    pub fn from_config(config: &PhysicsConfig) -> Self {
        ForceModel::new(config.spring_constant, config.friction_constant, config.gravity)
    }

    /// Vertical Hooke force summed over the given neighbors
    pub fn spring_force(&self, position: &Position, neighbors: &[Position]) -> Force {
        let mut total = Force::zero();
        for neighbor in neighbors {
            let dy = position.y() - neighbor.y();
            total.add(&Force::new(0.0, -self.spring_constant * dy, 0.0));
        }
        total
    }

    /// Drag opposing the velocity with magnitude `k_f |v|²`
    pub fn friction_force(&self, velocity: &Velocity) -> Force {
        let speed = velocity.magnitude();
        if speed == 0.0 {
            return Force::zero();
        }
        let scale = -self.friction_constant * velocity.magnitude_squared() / speed;
        Force::new(velocity.dx() * scale, velocity.dy() * scale, velocity.dz() * scale)
    }

    /// Linear pull back toward y = 0
    pub fn restoring_force(&self, position: &Position, mass: Mass) -> Force {
        Force::new(0.0, -mass.value() * self.gravity * position.y(), 0.0)
    }

    /// Sum of spring, friction and restoring terms
    pub fn net_force(
        &self,
        position: &Position,
        velocity: &Velocity,
        mass: Mass,
        neighbors: &[Position],
    ) -> Force {
        let mut net = self.spring_force(position, neighbors);
        net.add(&self.friction_force(velocity));
        net.add(&self.restoring_force(position, mass));
        net
    }
}

impl Default for ForceModel {
    fn default() -> Self {
        ForceModel::from_config(&PhysicsConfig::default())
    }
}
