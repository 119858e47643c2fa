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
//! Error types for lattice construction and configuration.

use crate::components::Role;
use thiserror::Error;

/// Errors reported by the lattice and its configuration
#[derive(Debug, Error)]
pub enum LatticeError {
    /// The lattice parameters are inconsistent; no lattice was created
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A cell index lies outside the lattice
    #[error("Cell ({row}, {col}) is outside the lattice")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },

    /// Initial conditions may only be set on integrated nodes
    #[error("Cell ({row}, {col}) is {role} and cannot be perturbed")]
    ImmutableNode {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Role of the rejected node
        role: Role,
    },

    /// Configuration text could not be parsed or written
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LatticeError::InvalidConfiguration(reason.into())
    }
}
