/// Every method call found in a parsed module, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub calls: Vec<Call>,
}

impl Module {
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }
}

/// An `obj.method(...)` call. Calls of bare functions are not collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: String,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,

    /// Position of the method name, 1-based
    pub line: usize,
    pub column: usize,
}

impl Call {
    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Value of the keyword argument `name=...`, if given.
    pub fn keyword(&self, name: &str) -> Option<&Expr> {
        self.keywords
            .iter()
            .find(|k| k.name == name)
            .map(|k| &k.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub name: String,
    pub value: Expr,
}

/// An argument expression, reduced to what extraction can use.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    /// f-string; its contents are opaque to us
    FString,
    /// Anything else, tagged with its grammar node kind
    Other(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    /// Integer literal that does not fit in an `i64`
    BigInt(String),
    Float(f64),
    Imaginary(String),
    Bool(bool),
    None,
    Ellipsis,
}

impl Constant {
    /// Text of the constant as Python's `str()` would render it.
    pub fn to_text(&self) -> String {
        match self {
            Constant::Str(s) => s.clone(),
            Constant::Bytes(b) => bytes_repr(b),
            Constant::Int(i) => i.to_string(),
            Constant::BigInt(digits) => digits.clone(),
            Constant::Float(f) => float_repr(*f),
            Constant::Imaginary(text) => text.clone(),
            Constant::Bool(true) => "True".to_string(),
            Constant::Bool(false) => "False".to_string(),
            Constant::None => "None".to_string(),
            Constant::Ellipsis => "Ellipsis".to_string(),
        }
    }
}

/// Render a float the way Python does for ordinary values: integral
/// floats keep a trailing `.0`.
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// `repr()` of a bytes object: printable ASCII as is, everything else
/// as an escape. Single quotes unless only they appear in the value.
pub fn bytes_repr(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = format!("b{}", quote);
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote);
    out
}
