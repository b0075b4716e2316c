//! Python front end. Source is parsed with tree-sitter's Python grammar;
//! the resulting tree is reduced to the method calls it contains and the
//! literal values of their arguments. Nothing here evaluates code.

pub mod ast;
pub mod literal;
pub mod walk;

use std::fmt;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, ScriptForgeError};

pub use ast::Module;

/// The source text could not be parsed into a syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// Error positioned at the start of `node`, 1-based.
    pub fn at(node: Node<'_>, message: impl Into<String>) -> Self {
        let start = node.start_position();
        Self::new(message, start.row + 1, start.column + 1)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid Python syntax at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Parse `source` and collect its method calls.
///
/// Any error or missing node in the tree fails the whole parse.
pub fn parse_module(source: &str) -> Result<Module> {
    let tree = parse_tree(source)?;
    if let Some(err) = first_error(&tree) {
        return Err(err.into());
    }
    let calls = walk::calls(&tree, source)?;
    Ok(Module { calls })
}

fn parse_tree(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ScriptForgeError::Parser(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ScriptForgeError::Parser("parsing was cancelled".to_string()))
}

/// The first `ERROR` or missing node in document order.
fn first_error(tree: &Tree) -> Option<SyntaxError> {
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }

    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if node.is_missing() {
            let expected = if node.is_named() {
                node.kind().to_string()
            } else {
                format!("'{}'", node.kind())
            };
            return Some(SyntaxError::at(node, format!("missing {}", expected)));
        }
        if node.is_error() {
            return Some(SyntaxError::at(node, "invalid syntax"));
        }

        // Only subtrees that contain an error are worth entering.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Some(SyntaxError::at(root, "invalid syntax"));
            }
        }
    }
}
