// SPDX-License-Identifier: MIT

//! [`TreeNode`] — a hand-buildable stand-in for a real parser's AST, for
//! tests and for callers without a production parser wired up yet.

use crate::ast::{AstNode, NodeKind};

#[derive(Debug, Clone)]
pub struct TreeNode {
    kind: NodeKind,
    text: String,
    identifier: Option<String>,
    children: Vec<Box<dyn AstNode>>,
}

impl TreeNode {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            identifier: None,
            children: Vec::new(),
        }
    }

    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn AstNode>)
            .collect();
        self
    }
}

impl AstNode for TreeNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn children(&self) -> &[Box<dyn AstNode>] {
        &self.children
    }
}
