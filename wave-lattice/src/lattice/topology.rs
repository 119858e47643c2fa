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
//! Neighbor topology and role assignment
//!
//! Both are computed once when the lattice is built. Roles never change
//! afterwards, so the live-neighbor lists can be cached: each cell couples to
//! its right, left, lower and upper neighbors (in that order) when they exist
//! and are not static.

use crate::components::Role;
use crate::config::LatticeConfig;

/// Upper bound on live neighbors of a cell
pub(crate) const MAX_NEIGHBORS: usize = 4;

/// Grid offsets as (row, col), in summation order: right, left, down, up
const OFFSETS: [(isize, isize); MAX_NEIGHBORS] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Live neighbor indices of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Adjacency {
    indices: [usize; MAX_NEIGHBORS],
    len: usize,
}

impl Adjacency {
    fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }

    /// Row-major indices of the live neighbors
    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

/// Cached live-neighbor lists for every cell, row-major
#[derive(Debug, Clone)]
pub(crate) struct Topology {
    width: usize,
    adjacency: Vec<Adjacency>,
}

impl Topology {
    /// Build the neighbor lists, excluding static cells
    pub(crate) fn build(width: usize, height: usize, roles: &[Role]) -> Self {
        debug_assert_eq!(roles.len(), width * height);

        let mut adjacency = vec![Adjacency::default(); width * height];
        for row in 0..height {
            for col in 0..width {
                let cell = &mut adjacency[row * width + col];
                for (dr, dc) in OFFSETS {
                    let (Some(nr), Some(nc)) =
                        (row.checked_add_signed(dr), col.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if nr >= height || nc >= width {
                        continue;
                    }
                    let index = nr * width + nc;
                    if roles[index].couples() {
                        cell.push(index);
                    }
                }
            }
        }

        Topology { width, adjacency }
    }

    /// Neighbor list of the cell at a row-major index
    pub(crate) fn adjacency(&self, index: usize) -> &Adjacency {
        &self.adjacency[index]
    }

    /// Live neighbors of a cell as (row, col) pairs
    pub(crate) fn neighbor_cells(&self, index: usize) -> Vec<(usize, usize)> {
        self.adjacency[index]
            .indices()
            .iter()
            .map(|&i| (i / self.width, i % self.width))
            .collect()
    }
}

/// Assign a role to every cell, row-major
///
/// Later rules override earlier ones: screen edges first, then the wall
/// column, then the slit reopening part of the wall, then the driven cell.
pub(crate) fn assign_roles(config: &LatticeConfig) -> Vec<Role> {
    let (width, height) = (config.width, config.height);
    let mut roles = Vec::with_capacity(width * height);

    for row in 0..height {
        for col in 0..width {
            let on_screen = row == 0 || row == height - 1 || col == width - 1;
            roles.push(if on_screen { Role::Boundary } else { Role::Free });
        }
    }

    for row in 0..height {
        roles[row * width + config.wall_column] = Role::Static;
    }
    for row in config.slit_rows() {
        roles[row * width + config.wall_column] = Role::Free;
    }

    roles[config.driven_row * width + config.driven_column] = Role::Driven;
    roles
}
