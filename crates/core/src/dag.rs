// SPDX-License-Identifier: MIT

//! [`DagNode`] — the read-only, per-namespace unit the deployment DAG is
//! built from.

use crate::resource::ResourceId;
use crate::task::Task;
use std::sync::Arc;

/// One namespace's worth of deploy tasks. Tasks within a node run in the
/// planner's insertion order ("intra-directory serialization"); across
/// nodes, ordering is enforced by each task awaiting its dependencies'
/// tasks directly, not by this struct. Tasks are `Arc`-shared because a
/// dependent node's task closures hold references into an already-built
/// node's task list.
pub struct DagNode {
    pub id: ResourceId,
    pub tasks: Vec<Arc<Task>>,
}

impl DagNode {
    pub fn new(id: ResourceId) -> Self {
        Self { id, tasks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
