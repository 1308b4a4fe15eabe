// src/tree/builder.rs
//! Stack-based incremental AST construction. The frontend adapter opens
//! interior nodes, appends leaves, and closes back to the parent; the
//! finished tree is taken with [`AstBuilder::product`].

use super::{AstNode, NodeKind};
use crate::types::Location;

/// A stack of currently-open interior nodes. Misuse (closing the root,
/// taking the product with open nodes, adding before the root) is a
/// programmer error and panics.
#[derive(Debug, Default)]
pub struct AstBuilder {
    stack: Vec<AstNode>,
}

impl AstBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the root Composite. Must be the first operation.
    pub fn open_root(&mut self, location: Location) {
        assert!(self.stack.is_empty(), "root opened twice");
        self.stack.push(AstNode::composite(location));
    }

    /// The finished tree. Every `open_*` must have been matched by a
    /// `close_node` before this is taken.
    #[must_use]
    pub fn product(mut self) -> AstNode {
        assert_eq!(
            self.stack.len(),
            1,
            "product taken with unclosed interior nodes"
        );
        self.stack.pop().expect("root is present")
    }

    /// Pops the current interior node back onto its parent.
    pub fn close_node(&mut self) {
        assert!(self.stack.len() > 1, "close_node would pop the root");
        let node = self.stack.pop().expect("stack is non-empty");
        self.current_mut().append_child(node);
    }

    pub fn open_assignment(&mut self, location: Location) {
        self.open(NodeKind::Assignment, location);
    }

    pub fn open_return(&mut self, location: Location) {
        self.open(NodeKind::Return, location);
    }

    pub fn open_block(&mut self, location: Location) {
        self.open(NodeKind::Composite, location);
    }

    pub fn open_cstyle_loop(&mut self, location: Location) {
        self.open(NodeKind::CStyleLoop, location);
    }

    pub fn open_if_statement(&mut self, location: Location) {
        self.open(NodeKind::If, location);
    }

    pub fn open_while_statement(&mut self, location: Location) {
        self.open(NodeKind::While, location);
    }

    pub fn open_unary_operation(&mut self, op: impl Into<String>, location: Location) {
        self.open(NodeKind::Unary { op: op.into() }, location);
    }

    pub fn open_binary_operation(&mut self, op: impl Into<String>, location: Location) {
        self.open(NodeKind::Binary { op: op.into() }, location);
    }

    pub fn open_compound_assignment(&mut self, op: impl Into<String>, location: Location) {
        self.open(NodeKind::CompoundAssign { op: op.into() }, location);
    }

    pub fn add_identifier(&mut self, name: impl Into<String>, location: Location) {
        self.add_leaf(AstNode::identifier(name, location));
    }

    pub fn add_literal(&mut self, lexeme: impl Into<String>, location: Location) {
        self.add_leaf(AstNode::literal(lexeme, location));
    }

    pub fn add_null(&mut self, location: Location) {
        self.add_leaf(AstNode::null(location));
    }

    pub fn add_unknown(&mut self, location: Location) {
        self.add_leaf(AstNode::new(NodeKind::Unknown, location));
    }

    pub fn add_break(&mut self, location: Location) {
        self.add_leaf(AstNode::new(NodeKind::Break, location));
    }

    pub fn add_continue(&mut self, location: Location) {
        self.add_leaf(AstNode::new(NodeKind::Continue, location));
    }

    fn open(&mut self, kind: NodeKind, location: Location) {
        assert!(!self.stack.is_empty(), "open before open_root");
        self.stack.push(AstNode::new(kind, location));
    }

    fn add_leaf(&mut self, node: AstNode) {
        self.current_mut().append_child(node);
    }

    fn current_mut(&mut self) -> &mut AstNode {
        self.stack.last_mut().expect("add before open_root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;
    use std::sync::Arc;

    fn loc() -> Location {
        Location::new(Arc::from("t.cpp"), Coordinate::new(1, 1), Coordinate::new(1, 2))
    }

    #[test]
    fn test_nested_build() {
        let mut builder = AstBuilder::new();
        builder.open_root(loc());
        builder.open_return(loc());
        builder.add_literal("0", loc());
        builder.close_node();
        let root = builder.product();
        assert!(root.is_composite());
        assert_eq!(root.children.len(), 1);
        assert!(matches!(root.children[0].kind, NodeKind::Return));
        assert_eq!(root.children[0].children.len(), 1);
    }

    #[test]
    #[should_panic(expected = "close_node would pop the root")]
    fn test_closing_root_panics() {
        let mut builder = AstBuilder::new();
        builder.open_root(loc());
        builder.close_node();
    }

    #[test]
    #[should_panic(expected = "unclosed interior nodes")]
    fn test_product_with_open_node_panics() {
        let mut builder = AstBuilder::new();
        builder.open_root(loc());
        builder.open_return(loc());
        let _ = builder.product();
    }
}
