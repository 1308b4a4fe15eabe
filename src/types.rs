// src/types.rs
use std::fmt;
use std::sync::Arc;

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub line: usize,
    pub column: usize,
}

impl Coordinate {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Converts a 0-based tree-sitter point to a 1-based coordinate.
    #[must_use]
    pub fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source extent. Informational only; never participates in
/// similarity computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: Arc<str>,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Location {
    #[must_use]
    pub fn new(filename: Arc<str>, start: Coordinate, end: Coordinate) -> Self {
        Self {
            filename,
            start,
            end,
        }
    }

    /// The extent of a tree-sitter node within `filename`.
    #[must_use]
    pub fn of_node(filename: &Arc<str>, node: tree_sitter::Node) -> Self {
        Self {
            filename: Arc::clone(filename),
            start: Coordinate::from_point(node.start_position()),
            end: Coordinate::from_point(node.end_position()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}-{}>", self.filename, self.start, self.end)
    }
}
