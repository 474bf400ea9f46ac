// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bqp-core: data model shared by the deployment planner, executor, and
//! reconciler — resource identifiers, the path↔id mapping, the task
//! primitive, and the topological sorter.

pub mod dag;
pub mod error;
pub mod file;
pub mod inventory;
pub mod path;
pub mod resource;
pub mod task;
pub mod time_fmt;
pub mod topo;

pub use dag::DagNode;
pub use error::CoreError;
pub use file::{FileJob, LocalFile};
pub use inventory::RemoteInventory;
pub use path::{id2path, path2id, DATASET_DDL_FILENAME};
pub use resource::{parse_identifier, ResourceId, ResourceKind};
pub use task::{Task, TaskStatus};
pub use time_fmt::{format_bytes, format_elapsed, format_elapsed_ms};
pub use topo::topo_sort;
