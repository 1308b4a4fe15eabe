// src/tree/mod.rs
//! The normalized AST: a closed set of node variants over a uniform
//! weighted tree. Built once per function, read-only afterwards.

pub mod builder;
pub mod printer;

pub use builder::AstBuilder;

use crate::types::Location;
use std::borrow::Cow;

/// Default per-node weight. Coercions synthesize nodes below this.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Lexical class of a literal token, decided from its form at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralClass {
    Integer,
    Float,
    Str,
}

/// Every spelling a C++ string or character literal can open with:
/// plain and raw quoting under the `u8`/`u`/`U`/`L` encoding prefixes.
const STRING_PREFIXES: &[&str] = &[
    "\"", "'", "R\"", "L\"", "L'", "LR\"", "u8\"", "u8'", "u8R\"", "u\"", "u'", "uR\"", "U\"",
    "U'", "UR\"",
];

impl LiteralClass {
    /// Classifies a literal lexeme. Any string or character quoting makes
    /// a string; hex stays integral regardless of the letters it contains;
    /// a decimal point, exponent, or float suffix makes a float.
    #[must_use]
    pub fn of_lexeme(lexeme: &str) -> Self {
        if STRING_PREFIXES.iter().any(|prefix| lexeme.starts_with(prefix)) {
            return Self::Str;
        }
        if lexeme.starts_with("0x") || lexeme.starts_with("0X") {
            return Self::Integer;
        }
        let floaty = lexeme.contains('.')
            || lexeme.contains(['e', 'E'])
            || lexeme.ends_with(['f', 'F']);
        if floaty {
            Self::Float
        } else {
            Self::Integer
        }
    }
}

/// The closed variant set. Payloads live here; location, weight and
/// children are uniform across variants and live on [`AstNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Composite,
    Null,
    Unknown,
    Identifier { name: String },
    Literal { value: String, class: LiteralClass },
    Assignment,
    Return,
    Unary { op: String },
    Binary { op: String },
    CompoundAssign { op: String },
    CStyleLoop,
    If,
    While,
    Break,
    Continue,
}

impl NodeKind {
    /// Index from which appended children are wrapped in a Composite so
    /// that body statements accumulate past the last named slot.
    fn wrap_threshold(&self) -> Option<usize> {
        match self {
            Self::CStyleLoop => Some(3),
            Self::If | Self::While => Some(1),
            _ => None,
        }
    }

    /// Short label used by the printer.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Composite => "Composite",
            Self::Null => "Null",
            Self::Unknown => "Unknown",
            Self::Identifier { .. } => "Identifier",
            Self::Literal { .. } => "Literal",
            Self::Assignment => "Assignment",
            Self::Return => "Return",
            Self::Unary { .. } => "UnaryOperation",
            Self::Binary { .. } => "BinaryOperation",
            Self::CompoundAssign { .. } => "CompoundAssignment",
            Self::CStyleLoop => "CStyleLoop",
            Self::If => "IfStatement",
            Self::While => "WhileStatement",
            Self::Break => "Break",
            Self::Continue => "Continue",
        }
    }
}

/// One node of the normalized AST.
#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: NodeKind,
    pub location: Location,
    pub weight: f64,
    pub children: Vec<AstNode>,
}

impl AstNode {
    #[must_use]
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Self {
            kind,
            location,
            weight: DEFAULT_WEIGHT,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn composite(location: Location) -> Self {
        Self::new(NodeKind::Composite, location)
    }

    #[must_use]
    pub fn null(location: Location) -> Self {
        Self::new(NodeKind::Null, location)
    }

    #[must_use]
    pub fn identifier(name: impl Into<String>, location: Location) -> Self {
        Self::new(
            NodeKind::Identifier { name: name.into() },
            location,
        )
    }

    /// A literal node; the lexical class is captured from the lexeme now
    /// and never revisited.
    #[must_use]
    pub fn literal(lexeme: impl Into<String>, location: Location) -> Self {
        let value = lexeme.into();
        let class = LiteralClass::of_lexeme(&value);
        Self::new(NodeKind::Literal { value, class }, location)
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite)
    }

    #[must_use]
    pub fn is_loop(&self) -> bool {
        matches!(self.kind, NodeKind::CStyleLoop)
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Appends a child, wrapping it in a Composite when it lands past the
    /// variant's last named slot.
    pub fn append_child(&mut self, node: AstNode) {
        let node = match self.kind.wrap_threshold() {
            Some(n) if self.children.len() >= n && !node.is_composite() => {
                let mut wrapper = AstNode::composite(node.location.clone());
                wrapper.children.push(node);
                wrapper
            }
            _ => node,
        };
        self.children.push(node);
    }

    /// Positional slot access. Absent slots read as a `Null` carrying this
    /// node's location.
    #[must_use]
    pub fn slot(&self, index: usize) -> Cow<'_, AstNode> {
        match self.children.get(index) {
            Some(child) => Cow::Borrowed(child),
            None => Cow::Owned(AstNode::null(self.location.clone())),
        }
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
    fn test_literal_classes() {
        assert_eq!(LiteralClass::of_lexeme("1"), LiteralClass::Integer);
        assert_eq!(LiteralClass::of_lexeme("0xFE"), LiteralClass::Integer);
        assert_eq!(LiteralClass::of_lexeme("1.5"), LiteralClass::Float);
        assert_eq!(LiteralClass::of_lexeme("1e9"), LiteralClass::Float);
        assert_eq!(LiteralClass::of_lexeme("2.0f"), LiteralClass::Float);
        assert_eq!(LiteralClass::of_lexeme("\"x\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("'c'"), LiteralClass::Str);
    }

    #[test]
    fn test_prefixed_string_literal_classes() {
        assert_eq!(LiteralClass::of_lexeme("R\"(raw)\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("R\"sep(raw)sep\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("L\"wide\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("u8\"utf8\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("u\"utf16\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("U\"utf32\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("LR\"(wide raw)\""), LiteralClass::Str);
        assert_eq!(LiteralClass::of_lexeme("u'c'"), LiteralClass::Str);
        // lexemes that merely start with a prefix letter are not strings
        assert_eq!(LiteralClass::of_lexeme("8"), LiteralClass::Integer);
    }

    #[test]
    fn test_missing_slot_reads_as_null() {
        let node = AstNode::new(NodeKind::Assignment, loc());
        assert!(matches!(node.slot(1).kind, NodeKind::Null));
        assert_eq!(node.slot(1).location, node.location);
    }

    #[test]
    fn test_while_wraps_body_statement() {
        let mut node = AstNode::new(NodeKind::While, loc());
        node.append_child(AstNode::identifier("cond", loc()));
        node.append_child(AstNode::identifier("stmt", loc()));
        assert!(matches!(node.children[0].kind, NodeKind::Identifier { .. }));
        assert!(node.children[1].is_composite());
        assert_eq!(node.children[1].children.len(), 1);
    }

    #[test]
    fn test_loop_wraps_from_fourth_child() {
        let mut node = AstNode::new(NodeKind::CStyleLoop, loc());
        for _ in 0..3 {
            node.append_child(AstNode::identifier("x", loc()));
        }
        node.append_child(AstNode::identifier("body", loc()));
        assert!(node.children[..3].iter().all(|c| !c.is_composite()));
        assert!(node.children[3].is_composite());
    }

    #[test]
    fn test_composite_children_never_rewrapped() {
        let mut node = AstNode::new(NodeKind::If, loc());
        node.append_child(AstNode::identifier("cond", loc()));
        let mut block = AstNode::composite(loc());
        block.append_child(AstNode::identifier("x", loc()));
        node.append_child(block);
        assert!(node.children[1].is_composite());
        assert_eq!(node.children[1].children.len(), 1);
    }
}
