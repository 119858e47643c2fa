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
//! Tick orchestration
//!
//! Every tick first copies all node positions into a snapshot, then updates
//! every node against that snapshot. No node ever sees a neighbor that was
//! already moved this tick, so the update pass is order independent and can
//! be split by row across threads without changing the result.

use super::topology::{Adjacency, MAX_NEIGHBORS};
use super::Lattice;
use crate::components::Position;
use crate::node::{Dynamics, Node};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Order in which the sequential pass visits cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Row-major, top-left first
    #[default]
    Forward,
    /// Row-major reversed, bottom-right first
    Reverse,
}

impl Lattice {
    /// Advance every node by one tick
    ///
    /// `sim_time` is supplied by the external clock and only drives the
    /// source node; the lattice never advances it. Uses the row-parallel pass
    /// when the `parallel` feature is enabled.
    pub fn step(&mut self, sim_time: f64) {
        #[cfg(feature = "parallel")]
        self.step_parallel(sim_time);

        #[cfg(not(feature = "parallel"))]
        self.step_sequential(sim_time, UpdateOrder::Forward);
    }

    /// Advance every node by one tick on the current thread
    pub fn step_sequential(&mut self, sim_time: f64, order: UpdateOrder) {
        self.take_snapshot();

        let count = self.nodes.len();
        match order {
            UpdateOrder::Forward => {
                for index in 0..count {
                    self.update_cell(index, sim_time);
                }
            }
            UpdateOrder::Reverse => {
                for index in (0..count).rev() {
                    self.update_cell(index, sim_time);
                }
            }
        }

        self.finish_tick(sim_time);
    }

    /// Advance every node by one tick, one Rayon task per row
    #[cfg(feature = "parallel")]
    pub fn step_parallel(&mut self, sim_time: f64) {
        self.take_snapshot();

        let width = self.width;
        let snapshot = &self.snapshot;
        let topology = &self.topology;
        let dynamics = &self.dynamics;

        self.nodes
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, cells)| {
                for (col, node) in cells.iter_mut().enumerate() {
                    let index = row * width + col;
                    update_node(node, topology.adjacency(index), snapshot, sim_time, dynamics);
                }
            });

        self.finish_tick(sim_time);
    }

    fn take_snapshot(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend(self.nodes.iter().map(Node::position));
    }

    fn update_cell(&mut self, index: usize, sim_time: f64) {
        update_node(
            &mut self.nodes[index],
            self.topology.adjacency(index),
            &self.snapshot,
            sim_time,
            &self.dynamics,
        );
    }

    fn finish_tick(&mut self, sim_time: f64) {
        self.ticks += 1;
        log::trace!("Tick {} at t = {}", self.ticks, sim_time);

        if self.warn_on_invalid {
            let invalid = self.nodes.iter().filter(|node| !node.is_valid()).count();
            if invalid > 0 {
                log::warn!(
                    "Tick {} left {} node(s) with non-finite position or velocity",
                    self.ticks,
                    invalid
                );
            }
        }
    }
}

/// Gather snapshot positions of the live neighbors and step one node
fn update_node(
    node: &mut Node,
    adjacency: &Adjacency,
    snapshot: &[Position],
    sim_time: f64,
    dynamics: &Dynamics,
) {
    let mut neighbors = [Position::zero(); MAX_NEIGHBORS];
    let indices = adjacency.indices();
    for (slot, &index) in neighbors.iter_mut().zip(indices) {
        *slot = snapshot[index];
    }
    node.apply_step(&neighbors[..indices.len()], sim_time, dynamics);
}
