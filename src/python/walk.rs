use tree_sitter::{Node, Tree};

use super::SyntaxError;
use super::ast::{Call, Expr, Keyword};
use super::literal;

/// Bracket depth at which Python's tokenizer gives up.
pub const MAX_NESTING: usize = 200;

/// Every `obj.method(...)` call in the tree, in document order.
///
/// This is a flat scan: control flow is ignored, so a call inside an `if`
/// body or a loop appears exactly once, where it is written. A call is
/// listed before the calls nested inside its callee and arguments.
///
/// The walk also rejects what the grammar lets through but Python does
/// not: over-deep bracket nesting, malformed escapes, bytes mixed with
/// text, and Python 2 `print`/`exec` statements.
pub fn calls(tree: &Tree, source: &str) -> Result<Vec<Call>, SyntaxError> {
    let mut calls = Vec::new();
    let mut depth = 0usize;
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        match node.kind() {
            "(" | "[" | "{" if !node.is_named() => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(SyntaxError::at(node, "too many nested parentheses"));
                }
            }
            ")" | "]" | "}" if !node.is_named() => depth = depth.saturating_sub(1),
            "string" | "concatenated_string" => {
                literal::expr(node, source)?;
            }
            "print_statement" => {
                return Err(SyntaxError::at(node, "Missing parentheses in call to 'print'"));
            }
            "exec_statement" => {
                return Err(SyntaxError::at(node, "Missing parentheses in call to 'exec'"));
            }
            "call" => {
                if let Some(call) = method_call(node, source)? {
                    calls.push(call);
                }
            }
            _ => {}
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(calls);
            }
        }
    }
}

fn method_call(node: Node<'_>, source: &str) -> Result<Option<Call>, SyntaxError> {
    let Some(function) = node.child_by_field_name("function") else {
        return Ok(None);
    };
    if function.kind() != "attribute" {
        return Ok(None);
    }
    let Some(attribute) = function.child_by_field_name("attribute") else {
        return Ok(None);
    };

    let start = attribute.start_position();
    let mut call = Call {
        method: literal::text(attribute, source).to_string(),
        args: Vec::new(),
        keywords: Vec::new(),
        line: start.row + 1,
        column: start.column + 1,
    };

    let Some(arguments) = node.child_by_field_name("arguments") else {
        return Ok(Some(call));
    };
    if arguments.kind() != "argument_list" {
        // f(x for x in xs)
        call.args.push(Expr::Other(arguments.kind()));
        return Ok(Some(call));
    }

    let mut cursor = arguments.walk();
    for child in arguments.named_children(&mut cursor) {
        match child.kind() {
            "comment" | "dictionary_splat" => {}
            "keyword_argument" => {
                let (Some(name), Some(value)) = (
                    child.child_by_field_name("name"),
                    child.child_by_field_name("value"),
                ) else {
                    continue;
                };
                call.keywords.push(Keyword {
                    name: literal::text(name, source).to_string(),
                    value: literal::expr(value, source)?,
                });
            }
            _ => call.args.push(literal::expr(child, source)?),
        }
    }

    Ok(Some(call))
}
