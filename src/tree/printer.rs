// src/tree/printer.rs
//! Indented rendering of a normalized AST for the print mode.

use super::{AstNode, NodeKind};
use std::fmt::Write as _;

/// Renders `root` as one line per node, two spaces of indent per level.
#[must_use]
pub fn render(root: &AstNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &AstNode, level: usize, out: &mut String) {
    let indent = "  ".repeat(level);
    let _ = writeln!(out, "{indent}{} at {}", describe(node), node.location);
    for child in &node.children {
        render_node(child, level + 1, out);
    }
}

fn describe(node: &AstNode) -> String {
    let label = node.kind.label();
    match &node.kind {
        NodeKind::Identifier { name } => format!("{label}({name})"),
        NodeKind::Literal { value, .. } => format!("{label}({value})"),
        NodeKind::Unary { op }
        | NodeKind::Binary { op }
        | NodeKind::CompoundAssign { op } => format!("{label}({op})"),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AstBuilder;
    use crate::types::{Coordinate, Location};
    use std::sync::Arc;

    fn loc() -> Location {
        Location::new(Arc::from("t.cpp"), Coordinate::new(1, 1), Coordinate::new(1, 9))
    }

    #[test]
    fn test_render_indents_children() {
        let mut builder = AstBuilder::new();
        builder.open_root(loc());
        builder.open_return(loc());
        builder.add_literal("0", loc());
        builder.close_node();
        let rendered = render(&builder.product());

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Composite at t.cpp"));
        assert!(lines[1].starts_with("  Return at"));
        assert!(lines[2].starts_with("    Literal(0) at"));
    }
}
