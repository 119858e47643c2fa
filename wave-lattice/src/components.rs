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
//! Lattice node primitives
//!
//! Positions and velocities are full 3D vectors so renderers can place nodes
//! in space, but the physics only ever moves the vertical (`y`) component.
//! The horizontal and depth components are fixed when the lattice is built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D position with double-precision coordinates
///
/// # Examples
///
/// ```
/// use wave_lattice::Position;
///
/// let pos = Position::new(5.0, 0.0, 10.0);
/// assert_eq!(pos.x(), 5.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0, 0.0)
    }

    /// Get the x coordinate (column axis)
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate (the displacement axis)
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the z coordinate (row axis)
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Set the vertical displacement
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Check if all coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Get the position as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// 3D velocity with double-precision components
///
/// After every integration step the horizontal and depth components are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Velocity { dx, dy, dz }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0, 0.0)
    }

    /// Create a purely vertical velocity
    pub fn vertical(dy: f64) -> Self {
        Velocity::new(0.0, dy, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Get the z component
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Project onto the vertical axis, zeroing the x and z components
    pub fn project_vertical(&mut self) {
        self.dx = 0.0;
        self.dz = 0.0;
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dz.is_finite()
    }

    /// Squared speed
    pub fn magnitude_squared(&self) -> f64 {
        self.dx * self.dx + self.dy * self.dy + self.dz * self.dz
    }

    /// Speed
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }
}

/// Mass of a node
///
/// # Examples
///
/// ```
/// use wave_lattice::Mass;
///
/// let mass = Mass::new(1.0);
/// assert_eq!(mass.inverse(), 1.0);
/// assert!(Mass::try_new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is not strictly positive and finite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0 && value.is_finite(), "Mass must be positive and finite");
        Mass { value }
    }

    /// Try to create a new mass
    ///
    /// Returns `None` unless the value is strictly positive and finite.
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get 1/m
    pub fn inverse(&self) -> f64 {
        1.0 / self.value
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass { value: 1.0 }
    }
}

/// How a node is stepped
///
/// Roles are assigned when the lattice is built and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Ordinary mass integrated from the force model
    Free,
    /// Immovable wall node; exerts no spring force on its neighbors
    Static,
    /// Wave source whose height is a prescribed function of time
    Driven,
    /// Screen node on the lattice edge; same physics as `Free`
    Boundary,
}

impl Role {
    /// Whether the node is advanced by the force model and integrator
    pub fn is_integrated(self) -> bool {
        matches!(self, Role::Free | Role::Boundary)
    }

    /// Whether the node contributes spring force to its neighbors
    pub fn couples(self) -> bool {
        self != Role::Static
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Free => "free",
            Role::Static => "static",
            Role::Driven => "driven",
            Role::Boundary => "boundary",
        };
        f.write_str(name)
    }
}
