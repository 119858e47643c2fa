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
//! Simulation configuration
//!
//! All values are plain data with serde support so a whole run can be
//! described in a JSON file. `Default` for every struct is the reference
//! configuration: a 100x100 lattice with spacing 5, a wall at column 50 with a
//! 15-row slit centered on row 50, and a source at (50, 0) oscillating with
//! amplitude 50 and period constant 200.

use crate::error::{LatticeError, Result};
use serde::{Deserialize, Serialize};

/// Lattice geometry and role placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Equilibrium distance between adjacent nodes along both axes
    pub spacing: f64,
    /// Number of free rows left open in the wall column
    pub slit_size: usize,
    /// Row the slit is centered on
    pub slit_center_row: usize,
    /// Column holding the static wall
    pub wall_column: usize,
    /// Row of the driven node
    pub driven_row: usize,
    /// Column of the driven node
    pub driven_column: usize,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        LatticeConfig {
            width: 100,
            height: 100,
            spacing: 5.0,
            slit_size: 15,
            slit_center_row: 50,
            wall_column: 50,
            driven_row: 50,
            driven_column: 0,
        }
    }
}

impl LatticeConfig {
    /// Check the geometry for consistency
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LatticeError::invalid(format!(
                "lattice dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(LatticeError::invalid(format!(
                "spacing must be positive and finite, got {}",
                self.spacing
            )));
        }
        if self.slit_size > self.height {
            return Err(LatticeError::invalid(format!(
                "slit size {} exceeds lattice height {}",
                self.slit_size, self.height
            )));
        }
        if self.slit_center_row >= self.height {
            return Err(LatticeError::invalid(format!(
                "slit center row {} outside [0, {})",
                self.slit_center_row, self.height
            )));
        }
        if self.wall_column >= self.width {
            return Err(LatticeError::invalid(format!(
                "wall column {} outside [0, {})",
                self.wall_column, self.width
            )));
        }
        if self.driven_row >= self.height || self.driven_column >= self.width {
            return Err(LatticeError::invalid(format!(
                "driven cell ({}, {}) outside the {}x{} lattice",
                self.driven_row, self.driven_column, self.width, self.height
            )));
        }
        if self.driven_column == self.wall_column {
            return Err(LatticeError::invalid(format!(
                "driven cell ({}, {}) lies on the wall column",
                self.driven_row, self.driven_column
            )));
        }
        Ok(())
    }

    /// Rows of the wall column left open, as a half-open range
    ///
    /// The unclipped run is `center - slit_size / 2 .. center - slit_size / 2 + slit_size`,
    /// so odd-sized slits are symmetric about the center. Both ends are then
    /// clipped to the lattice independently, which never shifts the run.
    pub fn slit_rows(&self) -> std::ops::Range<usize> {
        let half = self.slit_size / 2;
        let end = self
            .slit_center_row
            .saturating_add(self.slit_size - half)
            .min(self.height);
        let start = self.slit_center_row.saturating_sub(half).min(end);
        start..end
    }
}

/// Force model constants and integrator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Hooke constant of the vertical springs
    pub spring_constant: f64,
    /// Quadratic drag coefficient
    pub friction_constant: f64,
    /// Restoring pull toward y = 0 (disabled in the reference run)
    pub gravity: f64,
    /// Mass of every node
    pub mass: f64,
    /// Integration step; 1.0 reproduces the per-tick reference update
    pub timestep: f64,
    /// Optional cap on node speed
    pub velocity_clamp: Option<f64>,
    /// Pin nodes at y >= 0 and kill their velocity on contact
    pub floor_clamp: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            spring_constant: 0.1,
            friction_constant: 0.1,
            gravity: 0.0,
            mass: 1.0,
            timestep: 1.0,
            velocity_clamp: None,
            floor_clamp: false,
        }
    }
}

impl PhysicsConfig {
    /// Check the constants for consistency
    pub fn validate(&self) -> Result<()> {
        let constants = [
            ("spring_constant", self.spring_constant),
            ("friction_constant", self.friction_constant),
            ("gravity", self.gravity),
        ];
        for (name, value) in constants {
            if !value.is_finite() {
                return Err(LatticeError::invalid(format!("{} must be finite, got {}", name, value)));
            }
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(LatticeError::invalid(format!(
                "mass must be positive and finite, got {}",
                self.mass
            )));
        }
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(LatticeError::invalid(format!(
                "timestep must be positive and finite, got {}",
                self.timestep
            )));
        }
        if let Some(max) = self.velocity_clamp {
            if !(max > 0.0 && max.is_finite()) {
                return Err(LatticeError::invalid(format!(
                    "velocity clamp must be positive and finite, got {}",
                    max
                )));
            }
        }
        Ok(())
    }
}

/// Prescribed oscillation of the driven node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Peak displacement
    pub amplitude: f64,
    /// Time scaling constant: height = amplitude * sin(t / period)
    pub period: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        DriveConfig {
            amplitude: 50.0,
            period: 200.0,
        }
    }
}

impl DriveConfig {
    /// Check the drive parameters
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() {
            return Err(LatticeError::invalid(format!(
                "drive amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if !(self.period > 0.0 && self.period.is_finite()) {
            return Err(LatticeError::invalid(format!(
                "drive period must be positive and finite, got {}",
                self.period
            )));
        }
        Ok(())
    }
}

/// Complete description of a simulation run
///
/// # Examples
///
/// ```
/// use wave_lattice::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(r#"{ "lattice": { "width": 80 } }"#).unwrap();
/// assert_eq!(config.lattice.width, 80);
/// assert_eq!(config.lattice.height, 100);
/// assert_eq!(config.physics.spring_constant, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Geometry and roles
    pub lattice: LatticeConfig,
    /// Force and integration constants
    pub physics: PhysicsConfig,
    /// Source oscillation
    pub drive: DriveConfig,
    /// Log a warning for ticks that leave nodes in a non-finite state
    pub warn_on_invalid: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            lattice: LatticeConfig::default(),
            physics: PhysicsConfig::default(),
            drive: DriveConfig::default(),
            warn_on_invalid: true,
        }
    }
}

impl SimulationConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.lattice.validate()?;
        self.physics.validate()?;
        self.drive.validate()
    }

    /// Parse and validate a JSON configuration; missing fields take reference values
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_reference_slit_rows() {
        let rows = LatticeConfig::default().slit_rows();
        assert_eq!(rows, 43..58);
        assert_eq!(rows.len(), 15);
    }

    #[test]
    fn test_even_slit_rows() {
        let config = LatticeConfig {
            slit_size: 4,
            slit_center_row: 10,
            height: 20,
            ..LatticeConfig::default()
        };
        assert_eq!(config.slit_rows(), 8..12);
    }

    #[test]
    fn test_slit_rows_clipped_to_lattice() {
        let config = LatticeConfig {
            width: 10,
            height: 10,
            slit_size: 6,
            slit_center_row: 1,
            wall_column: 5,
            driven_row: 5,
            ..LatticeConfig::default()
        };
        // Unclipped -2..4: the top is cut, the run does not slide down
        assert_eq!(config.slit_rows(), 0..4);

        let config = LatticeConfig {
            slit_center_row: 8,
            ..config
        };
        // Unclipped 5..11
        assert_eq!(config.slit_rows(), 5..10);
    }

    #[test]
    fn test_clipped_slit_mirrors_across_lattice() {
        let height = 10;
        for slit_size in [1, 3, 5, 7] {
            for center in 0..height {
                let top = LatticeConfig {
                    height,
                    slit_size,
                    slit_center_row: center,
                    ..LatticeConfig::default()
                };
                let bottom = LatticeConfig {
                    slit_center_row: height - 1 - center,
                    ..top.clone()
                };
                let rows = top.slit_rows();
                let mirrored = bottom.slit_rows();

                assert_eq!(rows.len(), mirrored.len(), "size {} center {}", slit_size, center);
                assert_eq!(rows.start, height - mirrored.end);
                // Never reaches further from the center than half the slit
                assert!(rows.clone().all(|r| r.abs_diff(center) <= slit_size / 2));
            }
        }
    }

    #[test]
    fn test_slit_rows_huge_slit_saturates() {
        let config = LatticeConfig {
            slit_size: usize::MAX,
            ..LatticeConfig::default()
        };
        assert_eq!(config.slit_rows(), 0..100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_slit_is_closed_wall() {
        let config = LatticeConfig {
            slit_size: 0,
            ..LatticeConfig::default()
        };
        assert!(config.slit_rows().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_physics_rejects_bad_constants() {
        let bad_mass = PhysicsConfig {
            mass: 0.0,
            ..PhysicsConfig::default()
        };
        assert!(bad_mass.validate().is_err());

        let bad_step = PhysicsConfig {
            timestep: f64::NAN,
            ..PhysicsConfig::default()
        };
        assert!(bad_step.validate().is_err());

        let bad_clamp = PhysicsConfig {
            velocity_clamp: Some(-0.2),
            ..PhysicsConfig::default()
        };
        assert!(bad_clamp.validate().is_err());

        let bad_spring = PhysicsConfig {
            spring_constant: f64::INFINITY,
            ..PhysicsConfig::default()
        };
        assert!(bad_spring.validate().is_err());
    }

    #[test]
    fn test_drive_rejects_zero_period() {
        let drive = DriveConfig {
            period: 0.0,
            ..DriveConfig::default()
        };
        assert!(matches!(
            drive.validate(),
            Err(LatticeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_toggles() {
        let mut config = SimulationConfig::default();
        config.physics.velocity_clamp = Some(0.2);
        config.physics.floor_clamp = true;

        let text = config.to_json_string().unwrap();
        let parsed = SimulationConfig::from_json_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_rejects_invalid_geometry() {
        let result = SimulationConfig::from_json_str(r#"{ "lattice": { "slit_size": 500 } }"#);
        assert!(matches!(result, Err(LatticeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_json_syntax_error() {
        let result = SimulationConfig::from_json_str("{ lattice: ");
        assert!(matches!(result, Err(LatticeError::Config(_))));
    }
}
