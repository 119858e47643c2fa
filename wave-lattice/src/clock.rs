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
//! Driving clock
//!
//! The lattice never advances time itself. A [`SimulationClock`] hands out a
//! monotonically increasing `sim_time` with a fixed increment per tick, which
//! makes runs framerate independent and reproducible. The default increment
//! is one 60 Hz display frame in milliseconds, the unit the drive period is
//! expressed in.

use crate::config::SimulationConfig;
use crate::error::{LatticeError, Result};
use crate::lattice::Lattice;

/// Fixed-increment simulation clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    time: f64,
    tick_duration: f64,
    ticks: u64,
}

impl SimulationClock {
    /// Default tick duration: one 60 Hz frame in milliseconds
    pub const FRAME_MILLIS: f64 = 1000.0 / 60.0;

    /// Create a clock starting at t = 0
    ///
    /// # Panics
    ///
    /// Panics if the tick duration is non-positive, NaN, or infinite
    pub fn new(tick_duration: f64) -> Self {
        assert!(
            tick_duration > 0.0 && tick_duration.is_finite(),
            "Tick duration must be positive and finite"
        );
        SimulationClock {
            time: 0.0,
            tick_duration,
            ticks: 0,
        }
    }

    /// Current simulation time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time added per tick
    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Number of ticks handed out
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by one tick and return the new time
    ///
    /// Time is computed as `ticks * tick_duration` rather than accumulated,
    /// so it does not drift over long runs.
    pub fn advance(&mut self) -> f64 {
        self.ticks += 1;
        self.time = self.ticks as f64 * self.tick_duration;
        self.time
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        SimulationClock::new(Self::FRAME_MILLIS)
    }
}

/// A lattice paired with its driving clock
#[derive(Debug, Clone)]
pub struct Simulation {
    lattice: Lattice,
    clock: SimulationClock,
}

impl Simulation {
    /// Pair an existing lattice with a clock
    pub fn new(lattice: Lattice, clock: SimulationClock) -> Self {
        Simulation { lattice, clock }
    }

    /// Build the lattice from configuration and use the default clock
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Ok(Simulation::new(Lattice::from_config(config)?, SimulationClock::default()))
    }

    /// Build with a custom tick duration
    pub fn with_tick_duration(config: &SimulationConfig, tick_duration: f64) -> Result<Self> {
        if !(tick_duration > 0.0 && tick_duration.is_finite()) {
            return Err(LatticeError::invalid(format!(
                "tick duration must be positive and finite, got {}",
                tick_duration
            )));
        }
        Ok(Simulation::new(
            Lattice::from_config(config)?,
            SimulationClock::new(tick_duration),
        ))
    }

    /// The lattice
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Mutable lattice access, for setting initial conditions
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        &mut self.lattice
    }

    /// The clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Advance the clock and step the lattice once
    pub fn tick(&mut self) {
        let t = self.clock.advance();
        self.lattice.step(t);
    }

    /// Run `ticks` ticks
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
        log::debug!(
            "Ran {} ticks, t = {:.1}, kinetic energy {:.4e}",
            ticks,
            self.clock.time(),
            self.lattice.kinetic_energy()
        );
    }

    /// Consume the simulation and return the lattice
    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_without_drift() {
        let mut clock = SimulationClock::new(0.1);
        for _ in 0..1000 {
            clock.advance();
        }
        assert_eq!(clock.ticks(), 1000);
        assert_eq!(clock.time(), 1000.0 * 0.1);
    }

    #[test]
    fn test_default_clock_is_one_frame() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.advance(), SimulationClock::FRAME_MILLIS);
    }

    #[test]
    #[should_panic(expected = "Tick duration must be positive and finite")]
    fn test_clock_rejects_zero_tick() {
        SimulationClock::new(0.0);
    }

    #[test]
    fn test_simulation_run() {
        let mut config = SimulationConfig::default();
        config.lattice.width = 20;
        config.lattice.height = 20;
        config.lattice.wall_column = 10;
        config.lattice.slit_center_row = 10;
        config.lattice.slit_size = 5;
        config.lattice.driven_row = 10;

        let mut sim = Simulation::from_config(&config).unwrap();
        sim.run(5);

        assert_eq!(sim.clock().ticks(), 5);
        assert_eq!(sim.lattice().ticks(), 5);
        let expected = 50.0 * (5.0 * SimulationClock::FRAME_MILLIS / 200.0).sin();
        let source = sim.lattice().node_at(10, 0).unwrap().position().y();
        assert!((source - expected).abs() < 1e-12);
    }

    #[test]
    fn test_simulation_rejects_bad_tick() {
        let config = SimulationConfig::default();
        assert!(Simulation::with_tick_duration(&config, -1.0).is_err());
    }
}
