// SPDX-License-Identifier: MIT

//! The SQL AST interface the analyzer consumes.
//!
//! The real parser — an AST traversal producing identifier nodes — is an
//! external, pluggable dependency. What it must
//! expose is a tagged visitor with one variant per statement construct, not
//! fields probed by name: that's what [`NodeKind`]
//! and [`AstNode`] are.

/// Tag for a node's parent construct, matching the classifier's dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    SchemaStatement,
    TableStatement,
    ProcedureStatement,
    FunctionStatement,
    CreateModelStatement,
    CallStatement,
    /// Any other top-level `*_statement` construct (the catch-all fallback;
    /// load-bearing: must resolve to a `TABLE` destination).
    OtherStatement,
    FromItem,
    FunctionCall,
    NonRecursiveCte,
    /// Anything else (expressions, clauses, ...): never classified.
    Other,
}

/// A node in the SQL AST. Implemented by whatever real parser is plugged
/// in; `bqp-analyzer`'s `TreeNode` (behind `test-support`) is a
/// hand-buildable stand-in for tests.
pub trait AstNode {
    fn kind(&self) -> NodeKind;

    /// This node's own source text (unused by the analyzer directly, but
    /// useful to callers building error messages).
    fn text(&self) -> &str;

    /// The identifier this node names, when `kind` carries one: a
    /// schema/table/routine/model name for a destination-producing
    /// statement, a CTE's name, or the referenced name for a `from_item`,
    /// `function_call`, or `call_statement`.
    fn identifier(&self) -> Option<&str>;

    fn children(&self) -> &[Box<dyn AstNode>];
}
