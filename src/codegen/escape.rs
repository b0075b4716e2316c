/// Escape text for the inside of a double-quoted Python literal.
///
/// Backslashes must be escaped before quotes.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `value` as a complete double-quoted literal.
pub fn quoted(value: &str) -> String {
    format!("\"{}\"", escape(value))
}
