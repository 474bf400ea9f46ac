// SPDX-License-Identifier: MIT

//! Renders a deployment-ordered SQL script without executing anything —
//! the `bundle` command's output. Shares the planner's grouping and
//! topological ordering so a bundle always matches what a real deploy
//! would run, in the same order.

use crate::planner::{group_by_namespace, order_namespaces};
use bqp_core::{CoreError, FileJob};

/// Concatenate every file's SQL in deployment order, each preceded by a
/// comment naming its source path. Namespaces with no local files (pure
/// dependencies referenced from elsewhere) contribute nothing.
pub fn render(jobs: Vec<FileJob>) -> Result<String, CoreError> {
    let groups = group_by_namespace(jobs);
    let (order, _) = order_namespaces(&groups)?;

    let mut out = String::new();
    for ns_id in &order {
        let Some(files) = groups.get(ns_id) else {
            continue;
        };
        for job in files {
            out.push_str(&format!("-- {}\n", job.file.path.display()));
            out.push_str(job.file.sql.trim_end());
            out.push_str("\n\n");
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
