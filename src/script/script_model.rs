use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::python::ast::float_repr;

/// A parameterized browser-automation script. Extracted from recorded
/// Playwright code, or deserialized from YAML for review and editing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Values for the `${name}` placeholders used in action fields
    #[serde(default)]
    pub parameters: Parameters,

    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    pub fn new(actions: Vec<Action>, parameters: Parameters) -> Self {
        Self {
            name: None,
            description: None,
            parameters,
            actions,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Kinds of all recognized actions, in order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().filter_map(Action::kind).collect()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// The closed set of operations an action can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Navigate,
    Click,
    Fill,
    Type,
    Press,
    Select,
    Check,
    Uncheck,
    Hover,
    Wait,
    WaitTimeout,
    Screenshot,
}

impl ActionKind {
    pub const ALL: [ActionKind; 12] = [
        ActionKind::Navigate,
        ActionKind::Click,
        ActionKind::Fill,
        ActionKind::Type,
        ActionKind::Press,
        ActionKind::Select,
        ActionKind::Check,
        ActionKind::Uncheck,
        ActionKind::Hover,
        ActionKind::Wait,
        ActionKind::WaitTimeout,
        ActionKind::Screenshot,
    ];

    /// Playwright page method that performs this action.
    pub fn method(self) -> &'static str {
        match self {
            ActionKind::Navigate => "goto",
            ActionKind::Click => "click",
            ActionKind::Fill => "fill",
            ActionKind::Type => "type",
            ActionKind::Press => "press",
            ActionKind::Select => "select_option",
            ActionKind::Check => "check",
            ActionKind::Uncheck => "uncheck",
            ActionKind::Hover => "hover",
            ActionKind::Wait => "wait_for_selector",
            ActionKind::WaitTimeout => "wait_for_timeout",
            ActionKind::Screenshot => "screenshot",
        }
    }

    /// Look up the action kind for a Playwright method name.
    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.method() == method)
    }

    /// Positional arguments a call needs before it can be extracted.
    pub fn min_args(self) -> usize {
        match self {
            ActionKind::Screenshot => 0,
            ActionKind::Fill | ActionKind::Type | ActionKind::Press | ActionKind::Select => 2,
            _ => 1,
        }
    }

    /// Name used as the `action` tag in YAML.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::Click => "click",
            ActionKind::Fill => "fill",
            ActionKind::Type => "type",
            ActionKind::Press => "press",
            ActionKind::Select => "select",
            ActionKind::Check => "check",
            ActionKind::Uncheck => "uncheck",
            ActionKind::Hover => "hover",
            ActionKind::Wait => "wait",
            ActionKind::WaitTimeout => "wait_timeout",
            ActionKind::Screenshot => "screenshot",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized browser operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Go to a URL
    Navigate {
        #[serde(default, deserialize_with = "text")]
        url: String,
    },

    Click {
        #[serde(default, deserialize_with = "text")]
        selector: String,
    },

    /// Replace the contents of an input
    Fill {
        #[serde(default, deserialize_with = "text")]
        selector: String,
        #[serde(default, deserialize_with = "text")]
        value: String,
    },

    /// Type text key by key
    Type {
        #[serde(default, deserialize_with = "text")]
        selector: String,
        #[serde(default, alias = "value", deserialize_with = "text")]
        text: String,
    },

    /// Press a single key, e.g. `Enter`
    Press {
        #[serde(default, deserialize_with = "text")]
        selector: String,
        #[serde(default, deserialize_with = "text")]
        key: String,
    },

    /// Pick an option of a `<select>`
    Select {
        #[serde(default, deserialize_with = "text")]
        selector: String,
        #[serde(default, deserialize_with = "text")]
        value: String,
    },

    Check {
        #[serde(default, deserialize_with = "text")]
        selector: String,
    },

    Uncheck {
        #[serde(default, deserialize_with = "text")]
        selector: String,
    },

    Hover {
        #[serde(default, deserialize_with = "text")]
        selector: String,
    },

    /// Wait for an element to appear
    Wait {
        #[serde(default, deserialize_with = "text")]
        selector: String,
    },

    /// Sleep for a fixed number of milliseconds
    WaitTimeout {
        #[serde(default = "default_timeout")]
        timeout: serde_json::Number,
    },

    Screenshot {
        #[serde(default = "default_screenshot_path", deserialize_with = "text")]
        path: String,
    },

    /// Any record whose `action` tag is not recognized. Never produced by
    /// extraction; generation skips it.
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn kind(&self) -> Option<ActionKind> {
        Some(match self {
            Action::Navigate { .. } => ActionKind::Navigate,
            Action::Click { .. } => ActionKind::Click,
            Action::Fill { .. } => ActionKind::Fill,
            Action::Type { .. } => ActionKind::Type,
            Action::Press { .. } => ActionKind::Press,
            Action::Select { .. } => ActionKind::Select,
            Action::Check { .. } => ActionKind::Check,
            Action::Uncheck { .. } => ActionKind::Uncheck,
            Action::Hover { .. } => ActionKind::Hover,
            Action::Wait { .. } => ActionKind::Wait,
            Action::WaitTimeout { .. } => ActionKind::WaitTimeout,
            Action::Screenshot { .. } => ActionKind::Screenshot,
            Action::Unknown => return None,
        })
    }
}

fn default_timeout() -> serde_json::Number {
    serde_json::Number::from(1000)
}

pub fn default_screenshot_path() -> String {
    "screenshot.png".to_string()
}

/// Accept any scalar for a string field; numbers and booleans are
/// stringified the way Python would print them.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl Visitor<'_> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(float_repr(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(if v { "True" } else { "False" }.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

// ============================================================================
// Parameters
// ============================================================================

/// A parameter value: a string or a YAML primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(true) => f.write_str("True"),
            ParamValue::Bool(false) => f.write_str("False"),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => f.write_str(&float_repr(*x)),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Null => f.write_str("None"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Parameter name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// A copy of these parameters with `overrides` layered on top.
    pub fn merged(&self, overrides: &Parameters) -> Parameters {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
