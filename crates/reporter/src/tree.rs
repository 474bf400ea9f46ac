// SPDX-License-Identifier: MIT

//! Groups a flat list of named tasks into a tree by splitting each name on
//! `/`, so the console renderer can indent by directory the way the
//! deployment itself is laid out on disk.

use bqp_core::Task;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
pub struct TreeNode {
    pub task: Option<Arc<Task>>,
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.children.is_empty()
    }
}

/// Build a tree from `(name, task)` pairs, in insertion order: insertion
/// order within a sibling group is preserved via a side list, but lookup
/// and iteration use a `BTreeMap` so repeated renders of the same plan are
/// stable across redraws (sibling group names are unique path segments).
pub fn build(entries: &[(String, Arc<Task>)]) -> TreeNode {
    let mut root = TreeNode::default();
    for (name, task) in entries {
        let mut node = &mut root;
        let mut segments = name.split('/').peekable();
        while let Some(segment) = segments.next() {
            node = node.children.entry(segment.to_string()).or_default();
            if segments.peek().is_none() {
                node.task = Some(task.clone());
            }
        }
    }
    root
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
