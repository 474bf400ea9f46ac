// SPDX-License-Identifier: MIT

//! Destination/reference extraction.

use crate::ast::{AstNode, NodeKind};
use bqp_core::ResourceKind;
use std::collections::BTreeSet;

/// Raw (unnormalized) destinations and references extracted from one file's
/// AST. The caller (the planner) normalizes these against the file's own
/// namespace and the ambient project — the analyzer has no project/dataset
/// context of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub destinations: Vec<(String, ResourceKind)>,
    pub references: Vec<String>,
}

/// Walk `root`'s direct children as top-level statements (destinations),
/// then the whole tree for references, suppressing any reference that
/// names a CTE-local alias.
pub fn analyze(root: &dyn AstNode) -> Analysis {
    let mut cte_locals = BTreeSet::new();
    collect_cte_locals(root, &mut cte_locals);

    let mut destinations = Vec::new();
    for child in root.children() {
        let kind = match child.kind() {
            NodeKind::SchemaStatement => Some(ResourceKind::Schema),
            NodeKind::TableStatement => Some(ResourceKind::Table),
            NodeKind::ProcedureStatement | NodeKind::FunctionStatement => {
                Some(ResourceKind::Routine)
            }
            NodeKind::CreateModelStatement => Some(ResourceKind::Model),
            // call_statement is a reference, not a destination; collected below.
            NodeKind::CallStatement => None,
            // Catch-all: any other top-level statement construct creates a
            // table-kind destination. Load-bearing — do not narrow this.
            NodeKind::OtherStatement => Some(ResourceKind::Table),
            _ => None,
        };
        if let (Some(kind), Some(id)) = (kind, child.identifier()) {
            destinations.push((id.to_string(), kind));
        }
    }

    let mut references = Vec::new();
    collect_references(root, &mut references);
    references.retain(|r| !cte_locals.contains(r));

    Analysis {
        destinations,
        references,
    }
}

fn collect_cte_locals(node: &dyn AstNode, out: &mut BTreeSet<String>) {
    if node.kind() == NodeKind::NonRecursiveCte {
        if let Some(id) = node.identifier() {
            out.insert(id.to_string());
        }
    }
    for child in node.children() {
        collect_cte_locals(child.as_ref(), out);
    }
}

fn collect_references(node: &dyn AstNode, out: &mut Vec<String>) {
    if matches!(
        node.kind(),
        NodeKind::FromItem | NodeKind::FunctionCall | NodeKind::CallStatement
    ) {
        if let Some(id) = node.identifier() {
            out.push(id.to_string());
        }
    }
    for child in node.children() {
        collect_references(child.as_ref(), out);
    }
}

#[cfg(test)]
#[path = "visitor_tests.rs"]
mod tests;
