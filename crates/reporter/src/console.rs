// SPDX-License-Identifier: MIT

//! Renders a [`TreeNode`] as indented text, one row per task with a status
//! glyph, and one row per intermediate grouping segment (a namespace or a
//! reconcile bucket) with no glyph of its own.

use crate::glyph;
use crate::tree::TreeNode;
use std::fmt::Write;

pub fn render(root: &TreeNode, tick: u64) -> String {
    let mut out = String::new();
    for (name, child) in &root.children {
        render_node(&mut out, name, child, 0, tick);
    }
    out
}

fn render_node(out: &mut String, name: &str, node: &TreeNode, depth: usize, tick: u64) {
    let indent = "  ".repeat(depth);
    match &node.task {
        Some(task) if node.children.is_empty() => {
            let status = task.status();
            let g = if matches!(status, bqp_core::TaskStatus::Running) {
                glyph::spinner_frame(tick)
            } else {
                glyph::glyph(&status)
            };
            let _ = write!(out, "{indent}{g} {name}");
            match &status {
                bqp_core::TaskStatus::Success { message: Some(message) } => {
                    let _ = write!(out, " ({message})");
                }
                bqp_core::TaskStatus::Failed { error } => {
                    let _ = writeln!(out);
                    let _ = write!(out, "{indent}  {error}");
                }
                _ => {}
            }
            let _ = writeln!(out);
        }
        _ => {
            let _ = writeln!(out, "{indent}{name}");
            for (child_name, child) in &node.children {
                render_node(out, child_name, child, depth + 1, tick);
            }
        }
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
