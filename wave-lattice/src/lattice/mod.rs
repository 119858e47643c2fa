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
//! The lattice: a 2D grid of nodes with fixed topology
//!
//! Nodes are stored row-major. Node `(row, col)` rests at
//! `(col * spacing, 0, row * spacing)`, so rows run along the depth axis and
//! displacement happens along `y`.
//!
//! The lattice is an explicit value owned by whoever drives the simulation;
//! there is no global state. Renderers get read-only access through
//! [`Lattice::node_at`] and [`Lattice::rows`].

mod step;
mod topology;

pub use step::UpdateOrder;

use crate::components::{Mass, Position, Role};
use crate::config::{LatticeConfig, SimulationConfig};
use crate::error::{LatticeError, Result};
use crate::node::{Dynamics, Node};
use std::ops::Range;
use topology::{assign_roles, Topology};

/// 2D grid of nodes with a slit wall and a driven source
#[derive(Debug, Clone)]
pub struct Lattice {
    width: usize,
    height: usize,
    spacing: f64,
    wall_column: usize,
    slit_rows: Range<usize>,
    driven_cell: (usize, usize),
    nodes: Vec<Node>,
    topology: Topology,
    dynamics: Dynamics,
    /// Reused position buffer for the per-tick snapshot
    snapshot: Vec<Position>,
    ticks: u64,
    warn_on_invalid: bool,
}

impl Lattice {
    /// Build a lattice with reference physics and drive
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfiguration`] if the slit is taller
    /// than the lattice, the wall or driven cell lies outside it, or the
    /// driven cell sits on the wall column.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        width: usize,
        height: usize,
        spacing: f64,
        slit_size: usize,
        slit_center_row: usize,
        wall_column: usize,
        driven_row: usize,
        driven_column: usize,
    ) -> Result<Self> {
        let config = SimulationConfig {
            lattice: LatticeConfig {
                width,
                height,
                spacing,
                slit_size,
                slit_center_row,
                wall_column,
                driven_row,
                driven_column,
            },
            ..SimulationConfig::default()
        };
        Lattice::from_config(&config)
    }

    /// Build a lattice from a complete configuration
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfiguration`] for any geometry
    /// rejected by [`Lattice::create`], and also for non-finite force
    /// constants, a non-positive mass, timestep or drive period, a
    /// non-finite drive amplitude, or a non-positive velocity clamp.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let geometry = &config.lattice;
        let mass = Mass::try_new(config.physics.mass)
            .ok_or_else(|| LatticeError::invalid("mass must be positive and finite"))?;

        let roles = assign_roles(geometry);
        let topology = Topology::build(geometry.width, geometry.height, &roles);

        let nodes: Vec<Node> = roles
            .iter()
            .enumerate()
            .map(|(index, &role)| {
                let (row, col) = (index / geometry.width, index % geometry.width);
                let position = Position::new(
                    col as f64 * geometry.spacing,
                    0.0,
                    row as f64 * geometry.spacing,
                );
                Node::new(position, mass, role)
            })
            .collect();

        let slit_rows = geometry.slit_rows();
        log::debug!(
            "Built {}x{} lattice: wall column {}, slit rows {:?}, driven cell ({}, {})",
            geometry.width,
            geometry.height,
            geometry.wall_column,
            slit_rows,
            geometry.driven_row,
            geometry.driven_column
        );

        Ok(Lattice {
            width: geometry.width,
            height: geometry.height,
            spacing: geometry.spacing,
            wall_column: geometry.wall_column,
            slit_rows,
            driven_cell: (geometry.driven_row, geometry.driven_column),
            snapshot: Vec::with_capacity(nodes.len()),
            nodes,
            topology,
            dynamics: Dynamics::from_config(&config.physics, &config.drive),
            ticks: 0,
            warn_on_invalid: config.warn_on_invalid,
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Equilibrium distance between adjacent nodes
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Column holding the wall
    pub fn wall_column(&self) -> usize {
        self.wall_column
    }

    /// Rows left open in the wall column
    pub fn slit_rows(&self) -> Range<usize> {
        self.slit_rows.clone()
    }

    /// (row, col) of the driven node
    pub fn driven_cell(&self) -> (usize, usize) {
        self.driven_cell
    }

    /// Number of ticks stepped so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Force model, integrator and drive used for every tick
    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    /// Node at (row, col), or `None` outside the lattice
    pub fn node_at(&self, row: usize, col: usize) -> Option<&Node> {
        self.index(row, col).map(|i| &self.nodes[i])
    }

    /// Role of the node at (row, col)
    pub fn role_at(&self, row: usize, col: usize) -> Option<Role> {
        self.node_at(row, col).map(Node::role)
    }

    /// All nodes, row-major
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate over rows of nodes, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Node]> + '_ {
        self.nodes.chunks(self.width)
    }

    /// Cells that exert spring force on (row, col): in range and not static
    pub fn neighbor_cells(&self, row: usize, col: usize) -> Result<Vec<(usize, usize)>> {
        let index = self.checked_index(row, col)?;
        Ok(self.topology.neighbor_cells(index))
    }

    /// Set the initial vertical displacement of an integrated node
    ///
    /// # Errors
    ///
    /// Fails for cells outside the lattice and for static or driven nodes,
    /// whose motion is not free.
    pub fn set_displacement(&mut self, row: usize, col: usize, y: f64) -> Result<()> {
        let node = self.integrated_node_mut(row, col)?;
        node.set_displacement(y);
        Ok(())
    }

    /// Add a vertical velocity kick to an integrated node
    pub fn apply_impulse(&mut self, row: usize, col: usize, dy: f64) -> Result<()> {
        let node = self.integrated_node_mut(row, col)?;
        node.add_vertical_velocity(dy);
        Ok(())
    }

    /// Total kinetic energy `Σ ½ m |v|²` of the integrated nodes
    pub fn kinetic_energy(&self) -> f64 {
        self.nodes
            .iter()
            .filter(|node| node.role().is_integrated())
            .map(|node| 0.5 * node.mass().value() * node.velocity().magnitude_squared())
            .sum()
    }

    /// Largest absolute vertical displacement of any node
    pub fn max_displacement(&self) -> f64 {
        self.nodes
            .iter()
            .map(|node| node.position().y().abs())
            .fold(0.0, f64::max)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        self.index(row, col)
            .ok_or(LatticeError::OutOfBounds { row, col })
    }

    fn integrated_node_mut(&mut self, row: usize, col: usize) -> Result<&mut Node> {
        let index = self.checked_index(row, col)?;
        let node = &mut self.nodes[index];
        if !node.role().is_integrated() {
            return Err(LatticeError::ImmutableNode {
                row,
                col,
                role: node.role(),
            });
        }
        Ok(node)
    }
}
