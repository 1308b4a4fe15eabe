// src/parser/function.rs
//! Walks one `function_definition` cursor and drives the AST builder,
//! reducing the frontend's grammar-shaped tree to the normalized variant
//! set. Unsupported kinds become `Unknown` leaves and are logged.

use crate::tree::{AstBuilder, AstNode};
use crate::types::{Coordinate, Location};
use std::sync::Arc;
use tracing::warn;
use tree_sitter::Node;

pub(crate) struct FunctionVisitor<'a> {
    source: &'a str,
    filename: Arc<str>,
    builder: AstBuilder,
}

impl<'a> FunctionVisitor<'a> {
    pub(crate) fn new(source: &'a str, filename: Arc<str>) -> Self {
        Self {
            source,
            filename,
            builder: AstBuilder::new(),
        }
    }

    /// Parses the body of `fn_node`. Returns `None` for declarations
    /// without a body and for bodies with no statements; those functions
    /// never enter the comparison maps.
    pub(crate) fn parse(mut self, fn_node: Node) -> Option<AstNode> {
        let body = fn_node.child_by_field_name("body")?;
        self.builder.open_root(self.location(fn_node));
        for child in named_children(body) {
            self.process_node(child);
        }
        let root = self.builder.product();
        root.has_children().then_some(root)
    }

    fn process_node(&mut self, node: Node) {
        match node.kind() {
            "declaration" => self.process_declaration(node),
            // Frontend wrappers with no structural meaning of their own.
            "expression_statement" | "parenthesized_expression" | "condition_clause" => {
                self.process_children(node);
            }
            "number_literal" | "string_literal" | "char_literal" | "raw_string_literal" => {
                self.builder.add_literal(self.text(node), self.location(node));
            }
            "identifier" | "qualified_identifier" => {
                self.builder.add_identifier(self.text(node), self.location(node));
            }
            "return_statement" => {
                self.builder.open_return(self.location(node));
                self.process_children(node);
                self.builder.close_node();
            }
            "compound_statement" => {
                self.builder.open_block(self.location(node));
                self.process_children(node);
                self.builder.close_node();
            }
            "for_statement" => self.process_for(node),
            "if_statement" => self.process_if(node),
            "while_statement" => self.process_while(node),
            "break_statement" => self.builder.add_break(self.location(node)),
            "continue_statement" => self.builder.add_continue(self.location(node)),
            "binary_expression" => {
                let op = self.operator_of(node);
                self.builder.open_binary_operation(op, self.location(node));
                self.process_children(node);
                self.builder.close_node();
            }
            "unary_expression" | "update_expression" => {
                let op = self.operator_of(node);
                self.builder.open_unary_operation(op, self.location(node));
                self.process_children(node);
                self.builder.close_node();
            }
            "assignment_expression" => self.process_assignment(node),
            "comment" => {}
            other => {
                warn!(kind = other, at = %self.location(node), "unsupported node kind");
                self.builder.add_unknown(self.location(node));
            }
        }
    }

    fn process_children(&mut self, node: Node) {
        for child in named_children(node) {
            self.process_node(child);
        }
    }

    /// `int a = 1, b;` becomes one assignment per declarator; a declarator
    /// without an initializer is an assignment with an empty value slot.
    fn process_declaration(&mut self, node: Node) {
        for child in named_children(node) {
            match child.kind() {
                "init_declarator" => {
                    self.builder.open_assignment(self.location(child));
                    self.add_declared_name(child);
                    if let Some(value) = child.child_by_field_name("value") {
                        self.process_node(value);
                    }
                    self.builder.close_node();
                }
                "identifier" | "pointer_declarator" | "reference_declarator"
                | "array_declarator" => {
                    self.builder.open_assignment(self.location(child));
                    self.add_declared_name(child);
                    self.builder.close_node();
                }
                _ => {} // type specifiers and qualifiers
            }
        }
    }

    fn add_declared_name(&mut self, declarator: Node) {
        match declared_name(declarator) {
            Some(name) => {
                self.builder.add_identifier(self.text(name), self.location(name));
            }
            None => self.builder.add_unknown(self.location(declarator)),
        }
    }

    /// The init/cond/step slots may each be syntactically absent; every
    /// absent slot becomes a `Null` located between its neighbours so the
    /// loop's slot positions stay stable.
    fn process_for(&mut self, node: Node) {
        self.builder.open_cstyle_loop(self.location(node));

        let slots = [
            node.child_by_field_name("initializer"),
            node.child_by_field_name("condition"),
            node.child_by_field_name("update"),
        ];
        let body = node.child_by_field_name("body");

        for (index, slot) in slots.iter().enumerate() {
            match slot {
                Some(child) => self.process_node(*child),
                None => {
                    let location = self.sentinel_location(node, &slots, index, body);
                    self.builder.add_null(location);
                }
            }
        }
        if let Some(body) = body {
            self.process_node(body);
        }

        self.builder.close_node();
    }

    /// Start from the nearest present left neighbour's end, end at the
    /// nearest present right neighbour's start; the loop node itself
    /// bounds both sides.
    fn sentinel_location(
        &self,
        parent: Node,
        slots: &[Option<Node>],
        index: usize,
        body: Option<Node>,
    ) -> Location {
        let start = slots[..index]
            .iter()
            .rev()
            .flatten()
            .next()
            .map(|n| Coordinate::from_point(n.end_position()))
            .unwrap_or_else(|| Coordinate::from_point(parent.start_position()));
        let end = slots[index + 1..]
            .iter()
            .flatten()
            .next()
            .copied()
            .or(body)
            .map(|n| Coordinate::from_point(n.start_position()))
            .unwrap_or_else(|| Coordinate::from_point(parent.end_position()));
        Location::new(Arc::clone(&self.filename), start, end)
    }

    fn process_if(&mut self, node: Node) {
        self.builder.open_if_statement(self.location(node));
        if let Some(condition) = node.child_by_field_name("condition") {
            self.process_node(condition);
        }
        if let Some(consequence) = node.child_by_field_name("consequence") {
            self.process_node(consequence);
        }
        if let Some(alternative) = node.child_by_field_name("alternative") {
            // the else_clause wraps the actual statement
            if alternative.kind() == "else_clause" {
                if let Some(statement) = named_children(alternative).into_iter().next() {
                    self.process_node(statement);
                }
            } else {
                self.process_node(alternative);
            }
        }
        self.builder.close_node();
    }

    fn process_while(&mut self, node: Node) {
        self.builder.open_while_statement(self.location(node));
        if let Some(condition) = node.child_by_field_name("condition") {
            self.process_node(condition);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.process_node(body);
        }
        self.builder.close_node();
    }

    /// `=` opens a plain assignment; any other operator is a compound
    /// assignment with the trailing `=` stripped from its spelling.
    fn process_assignment(&mut self, node: Node) {
        let op = self.operator_of(node);
        if op == "=" {
            self.builder.open_assignment(self.location(node));
        } else {
            let op = op.strip_suffix('=').unwrap_or(&op).to_string();
            self.builder.open_compound_assignment(op, self.location(node));
        }
        self.process_children(node);
        self.builder.close_node();
    }

    /// The operator token is the first token among the node's children
    /// whose extent is not contained in any operand's extent.
    fn operator_of(&self, node: Node) -> String {
        let operands: Vec<(usize, usize)> = named_children(node)
            .iter()
            .map(|child| (child.start_byte(), child.end_byte()))
            .collect();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let covered = operands
                .iter()
                .any(|&(start, end)| start <= child.start_byte() && child.end_byte() <= end);
            if !covered {
                return self.text(child).to_string();
            }
        }
        String::new()
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn location(&self, node: Node) -> Location {
        Location::of_node(&self.filename, node)
    }
}

/// Collects the named children so the walking cursor does not outlive its
/// borrow of the node.
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Descends declarator wrappers (pointers, references, arrays, parens)
/// down to the declared name.
fn declared_name(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" | "field_identifier" | "qualified_identifier" | "destructor_name"
        | "operator_name" => Some(node),
        _ => {
            if let Some(inner) = node.child_by_field_name("declarator") {
                return declared_name(inner);
            }
            named_children(node).into_iter().find_map(declared_name)
        }
    }
}
