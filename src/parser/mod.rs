// src/parser/mod.rs
//! The C++ frontend: tree-sitter over the statically linked `tree-sitter-cpp`
//! grammar, reduced to one normalized AST per function. Only the file's own
//! text is ever parsed - includes never enter the tree - so everything the
//! walker sees belongs to the file being processed.

mod function;

use crate::error::{Error, Result};
use crate::tree::AstNode;
use crate::types::Location;
use function::{named_children, FunctionVisitor};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use tree_sitter::Node;

/// A function extracted from a source file: its stable signature key, its
/// extent, and its normalized body.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub location: Location,
    pub body: AstNode,
}

/// Owns the frontend parser state. One instance per corpus walk; never
/// shared across threads.
pub struct SourceParser {
    parser: tree_sitter::Parser,
}

impl SourceParser {
    /// Installs the C++ grammar. Failure here is the fatal
    /// "frontend unavailable" condition.
    pub fn new() -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_cpp::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parses one file into its functions. Whatever top-level declarations
    /// parse are returned; a syntactically broken region degrades to
    /// `Unknown` leaves rather than failing the file.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<Function>> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&path.to_string_lossy(), &source)
    }

    /// Parses in-memory source registered under `filename`.
    pub fn parse_source(&mut self, filename: &str, source: &str) -> Result<Vec<Function>> {
        let tree = self.parser.parse(source, None).ok_or_else(|| Error::Parse {
            path: filename.into(),
        })?;

        let filename: Arc<str> = Arc::from(filename);
        let mut functions = Vec::new();
        collect_top_level(tree.root_node(), source, &filename, &mut functions);
        Ok(functions)
    }
}

fn collect_top_level(root: Node, source: &str, filename: &Arc<str>, out: &mut Vec<Function>) {
    for child in named_children(root) {
        match child.kind() {
            "function_definition" => {
                if let Some(function) = extract_function(child, source, filename, None) {
                    out.push(function);
                }
            }
            // Only methods are interesting inside a class or struct.
            "class_specifier" | "struct_specifier" => {
                collect_methods(child, source, filename, out);
            }
            _ => {}
        }
    }
}

fn collect_methods(class_node: Node, source: &str, filename: &Arc<str>, out: &mut Vec<Function>) {
    let class_name = class_node
        .child_by_field_name("name")
        .and_then(|name| name.utf8_text(source.as_bytes()).ok());
    let Some(body) = class_node.child_by_field_name("body") else {
        return;
    };
    for member in named_children(body) {
        if member.kind() == "function_definition" {
            if let Some(function) = extract_function(member, source, filename, class_name) {
                out.push(function);
            }
        }
    }
}

fn extract_function(
    node: Node,
    source: &str,
    filename: &Arc<str>,
    class_name: Option<&str>,
) -> Option<Function> {
    let name = signature(node, source, class_name)?;
    debug!(function = %name, "parsing");
    let body = FunctionVisitor::new(source, Arc::clone(filename)).parse(node)?;
    Some(Function {
        name,
        location: Location::of_node(filename, node),
        body,
    })
}

/// The stable key for a function: class-qualified declarator name plus the
/// parameter list text with collapsed whitespace, e.g.
/// `Stack::push(int value)`.
fn signature(node: Node, source: &str, class_name: Option<&str>) -> Option<String> {
    let declarator = node.child_by_field_name("declarator")?;
    let func_decl = find_function_declarator(declarator)?;
    let name = func_decl
        .child_by_field_name("declarator")?
        .utf8_text(source.as_bytes())
        .ok()?;
    let params = func_decl
        .child_by_field_name("parameters")
        .and_then(|params| params.utf8_text(source.as_bytes()).ok())
        .map_or_else(|| "()".to_string(), collapse_whitespace);

    match class_name {
        Some(class) => Some(format!("{class}::{name}{params}")),
        None => Some(format!("{name}{params}")),
    }
}

fn find_function_declarator(node: Node) -> Option<Node> {
    if node.kind() == "function_declarator" {
        return Some(node);
    }
    find_function_declarator(node.child_by_field_name("declarator")?)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
