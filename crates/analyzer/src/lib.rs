// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bqp-analyzer: classifies identifier nodes in a SQL AST into destinations
//! and references.

pub mod ast;
pub mod visitor;

pub use ast::{AstNode, NodeKind};
pub use visitor::{analyze, Analysis};

#[cfg(any(test, feature = "test-support"))]
pub mod tree;
#[cfg(any(test, feature = "test-support"))]
pub use tree::TreeNode;
