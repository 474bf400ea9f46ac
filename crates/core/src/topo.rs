// SPDX-License-Identifier: MIT

//! Kahn-style topological sort with explicit cycle detection.

use crate::error::CoreError;
use std::collections::{BTreeMap, BTreeSet};

/// Sort `nodes` so that every predecessor named by an edge `(from, to)`
/// precedes `from` in the output (an edge `(from, to)` means "`from` depends
/// on `to`", matching the planner's `(destination, dependency)` relation).
///
/// `nodes` is the full node set (including isolated nodes with no edges).
/// Ties among simultaneously-ready nodes are broken lexicographically so the
/// same input always produces the same output.
pub fn topo_sort(
    nodes: &BTreeSet<String>,
    edges: &BTreeSet<(String, String)>,
) -> Result<Vec<String>, CoreError> {
    let mut successors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut in_degree: BTreeMap<&str, usize> = nodes.iter().map(|n| (n.as_str(), 0)).collect();

    for (from, to) in edges {
        // `from` depends on `to`: `to` must come out before `from`, i.e. the
        // edge in the sorted-successor sense runs `to -> from`.
        successors.entry(to.as_str()).or_default().insert(from.as_str());
        *in_degree.entry(from.as_str()).or_insert(0) += 1;
        in_degree.entry(to.as_str()).or_insert(0);
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&n, _)| n)
        .collect();

    let mut order = Vec::with_capacity(in_degree.len());
    while let Some(&next) = ready.iter().next() {
        ready.remove(next);
        order.push(next.to_string());
        if let Some(succs) = successors.get(next) {
            for &s in succs {
                if let Some(deg) = in_degree.get_mut(s) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.insert(s);
                    }
                }
            }
        }
    }

    if order.len() != in_degree.len() {
        let done: BTreeSet<&str> = order.iter().map(String::as_str).collect();
        let residual: Vec<String> = in_degree
            .keys()
            .filter(|n| !done.contains(*n))
            .map(|n| n.to_string())
            .collect();
        return Err(CoreError::CycleDetected { nodes: residual });
    }

    Ok(order)
}

#[cfg(test)]
#[path = "topo_tests.rs"]
mod tests;
