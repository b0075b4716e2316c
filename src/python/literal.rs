use std::iter::Peekable;
use std::str::Chars;

use tree_sitter::Node;

use super::SyntaxError;
use super::ast::{Constant, Expr};

/// Source text covered by `node`.
pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Reduce an argument node to a constant where it is one. Parentheses
/// around a literal are transparent, as in Python's own AST.
pub fn expr(node: Node<'_>, source: &str) -> Result<Expr, SyntaxError> {
    let node = unparenthesize(node);
    let constant = match node.kind() {
        "string" => return string(node, source),
        "concatenated_string" => return concatenated(node, source),
        "integer" => return Ok(integer(text(node, source))),
        "float" => return Ok(float(text(node, source))),
        "true" => Constant::Bool(true),
        "false" => Constant::Bool(false),
        "none" => Constant::None,
        "ellipsis" => Constant::Ellipsis,
        kind => return Ok(Expr::Other(kind)),
    };
    Ok(Expr::Constant(constant))
}

fn unparenthesize(node: Node<'_>) -> Node<'_> {
    let mut node = node;
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();
        match inner.as_slice() {
            [only] => node = *only,
            _ => break,
        }
    }
    node
}

// ============================================================================
// Strings
// ============================================================================

/// A single string literal, prefix and quotes included.
pub fn string(node: Node<'_>, source: &str) -> Result<Expr, SyntaxError> {
    let raw = text(node, source);
    let prefix_len = raw.find(|c: char| c == '\'' || c == '"').unwrap_or(raw.len());
    let prefix = raw.get(..prefix_len).unwrap_or_default().to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('t') {
        return Ok(Expr::FString);
    }

    let quoted = raw.get(prefix_len..).unwrap_or_default();
    let delimiter = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    let body = quoted
        .len()
        .checked_sub(delimiter)
        .and_then(|end| quoted.get(delimiter..end))
        .ok_or_else(|| SyntaxError::at(node, "unterminated string literal"))?
        .replace("\r\n", "\n");

    let is_raw = prefix.contains('r');
    let constant = if prefix.contains('b') {
        decode_bytes(&body, is_raw).map(Constant::Bytes)
    } else if is_raw {
        Ok(Constant::Str(body))
    } else {
        decode_str(&body).map(Constant::Str)
    };

    constant
        .map(Expr::Constant)
        .map_err(|message| SyntaxError::at(node, message))
}

/// Adjacent literals, `'a' 'b'`. Any f-string part makes the whole
/// value an f-string.
pub fn concatenated(node: Node<'_>, source: &str) -> Result<Expr, SyntaxError> {
    let mut joined = String::new();
    let mut bytes = Vec::new();
    let (mut has_str, mut has_bytes, mut formatted) = (false, false, false);

    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        if part.kind() != "string" {
            continue;
        }
        match string(part, source)? {
            Expr::Constant(Constant::Str(s)) => {
                has_str = true;
                joined.push_str(&s);
            }
            Expr::Constant(Constant::Bytes(b)) => {
                has_bytes = true;
                bytes.extend(b);
            }
            _ => formatted = true,
        }
    }

    if has_bytes && (has_str || formatted) {
        return Err(SyntaxError::at(node, "cannot mix bytes and nonbytes literals"));
    }
    Ok(if formatted {
        Expr::FString
    } else if has_bytes {
        Expr::Constant(Constant::Bytes(bytes))
    } else {
        Expr::Constant(Constant::Str(joined))
    })
}

/// Decode backslash escapes of a non-raw `str` body. Unknown escapes keep
/// their backslash, as Python does.
pub fn decode_str(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            'x' => out.push(code_point(hex_value(&mut chars, 2, "\\xXX")?)?),
            'u' => out.push(code_point(hex_value(&mut chars, 4, "\\uXXXX")?)?),
            'U' => out.push(code_point(hex_value(&mut chars, 8, "\\UXXXXXXXX")?)?),
            'N' => return Err("named Unicode escapes (\\N{...}) are not supported".to_string()),
            '0'..='7' => out.push(code_point(octal_value(next, &mut chars))?),
            other => match simple_escape(other) {
                Some(decoded) => out.push(decoded),
                None => {
                    out.push('\\');
                    out.push(other);
                }
            },
        }
    }

    Ok(out)
}

/// Decode a bytes body. `\u`, `\U` and `\N` are not escapes here.
pub fn decode_bytes(body: &str, raw: bool) -> Result<Vec<u8>, String> {
    if !body.is_ascii() {
        return Err("bytes can only contain ASCII literal characters".to_string());
    }
    if raw {
        return Ok(body.as_bytes().to_vec());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c as u8);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push(b'\\');
            break;
        };
        match next {
            '\n' => {}
            'x' => out.push(hex_value(&mut chars, 2, "\\xXX")? as u8),
            '0'..='7' => out.push((octal_value(next, &mut chars) & 0xff) as u8),
            other => match simple_escape(other) {
                Some(decoded) => out.push(decoded as u8),
                None => {
                    out.push(b'\\');
                    out.push(other as u8);
                }
            },
        }
    }

    Ok(out)
}

fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        _ => return None,
    })
}

/// Exactly `width` hex digits.
fn hex_value(chars: &mut Peekable<Chars<'_>>, width: usize, form: &str) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..width {
        match chars.peek().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                value = value * 16 + digit;
                chars.next();
            }
            None => return Err(format!("truncated {} escape", form)),
        }
    }
    Ok(value)
}

/// Up to three octal digits, the first already consumed.
fn octal_value(first: char, chars: &mut Peekable<Chars<'_>>) -> u32 {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.peek().and_then(|c| c.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                chars.next();
            }
            None => break,
        }
    }
    value
}

fn code_point(value: u32) -> Result<char, String> {
    match value {
        0xd800..=0xdfff => Err("surrogate code points are not supported".to_string()),
        _ => char::from_u32(value).ok_or_else(|| "illegal Unicode character".to_string()),
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// An `integer` node's text. Imaginary literals keep their text.
pub fn integer(text: &str) -> Expr {
    let digits = text.replace('_', "").to_ascii_lowercase();
    if digits.ends_with('j') {
        return Expr::Constant(Constant::Imaginary(digits));
    }

    let (radix, body) = match digits.get(..2) {
        Some("0x") => (16, digits.get(2..).unwrap_or_default()),
        Some("0o") => (8, digits.get(2..).unwrap_or_default()),
        Some("0b") => (2, digits.get(2..).unwrap_or_default()),
        _ => (10, digits.as_str()),
    };

    match i64::from_str_radix(body, radix) {
        Ok(value) => Expr::Constant(Constant::Int(value)),
        Err(_) if radix == 10 && !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) => {
            Expr::Constant(Constant::BigInt(body.trim_start_matches('0').to_string()))
        }
        Err(_) => Expr::Other("integer"),
    }
}

/// A `float` node's text.
pub fn float(text: &str) -> Expr {
    let digits = text.replace('_', "").to_ascii_lowercase();
    if digits.ends_with('j') {
        return Expr::Constant(Constant::Imaginary(digits));
    }
    match digits.parse::<f64>() {
        Ok(value) => Expr::Constant(Constant::Float(value)),
        Err(_) => Expr::Other("float"),
    }
}
