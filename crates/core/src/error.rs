// SPDX-License-Identifier: MIT

//! Error kinds shared by the planner and executor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot map path to a resource id: {path}")]
    InvalidPath { path: String },

    #[error("dependency graph has a cycle among: {}", .nodes.join(", "))]
    CycleDetected { nodes: Vec<String> },

    #[error("suspended: parent failed: {}", .parents.join(", "))]
    SuspendedByParent { parents: Vec<String> },

    #[error("missing required identifier component: {0}")]
    InvalidIdentifier(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
