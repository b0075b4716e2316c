use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ScriptForgeError};
use crate::script::script_model::{Action, ParamValue, Parameters};

use super::extractor::ExtractedAction;

/// Parameter key used for a lifted navigation target.
pub const URL_PARAM: &str = "url";

static NAME_OR_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:name|id)=(?:"([^"]+)"|'([^']+)')"#).expect("name/id pattern is valid")
});

// ============================================================================
// Parameter naming
// ============================================================================

/// Decides the parameter name for a value typed into the element at
/// `selector`. `index` is the action's position in the script.
pub trait ParamNamer {
    fn name_for(&self, selector: &str, index: usize) -> String;
}

/// Names a parameter after the `name="..."` or `id="..."` attribute in
/// the selector, falling back to `input_<index>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorParamNamer;

impl ParamNamer for SelectorParamNamer {
    fn name_for(&self, selector: &str, index: usize) -> String {
        scrape_param_name(selector).unwrap_or_else(|| format!("input_{}", index))
    }
}

/// First `name=` or `id=` attribute value in a selector, with either quote style.
pub fn scrape_param_name(selector: &str) -> Option<String> {
    let caps = NAME_OR_ID.captures(selector)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Placeholder text referring to parameter `name`.
pub fn placeholder(name: &str) -> String {
    format!("${{{}}}", name)
}

// ============================================================================
// Collisions
// ============================================================================

/// What to do when a lifted value wants a parameter name that already
/// holds a different value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Use the first free name among `name_2`, `name_3`, ...
    #[default]
    Suffix,
    /// Replace the earlier value; earlier placeholders see the new value
    Overwrite,
    /// Fail extraction
    Reject,
}

// ============================================================================
// Lifting
// ============================================================================

/// Turn raw extracted actions into script actions plus the parameters
/// their placeholders refer to.
///
/// - navigation targets marked parameterizable become `${url}`
/// - fill and type values always become a named parameter
/// - everything else stays literal
pub fn lift(
    extracted: Vec<ExtractedAction>,
    namer: &dyn ParamNamer,
    policy: CollisionPolicy,
) -> Result<(Vec<Action>, Parameters)> {
    let mut lifter = Lifter {
        parameters: Parameters::new(),
        policy,
    };

    let mut actions = Vec::with_capacity(extracted.len());
    for (index, item) in extracted.into_iter().enumerate() {
        let action = match item.action {
            Action::Navigate { url } if item.parameterizable => {
                let name = lifter.bind(URL_PARAM, url)?;
                Action::Navigate {
                    url: placeholder(&name),
                }
            }
            Action::Fill { selector, value } => {
                let name = lifter.bind(&namer.name_for(&selector, index), value)?;
                Action::Fill {
                    selector,
                    value: placeholder(&name),
                }
            }
            Action::Type { selector, text } => {
                let name = lifter.bind(&namer.name_for(&selector, index), text)?;
                Action::Type {
                    selector,
                    text: placeholder(&name),
                }
            }
            other => other,
        };
        actions.push(action);
    }

    Ok((actions, lifter.parameters))
}

struct Lifter {
    parameters: Parameters,
    policy: CollisionPolicy,
}

impl Lifter {
    /// Record `value` under `name` (or a substitute, per the policy) and
    /// return the name the placeholder should use.
    fn bind(&mut self, name: &str, value: String) -> Result<String> {
        let existing = match self.parameters.get(name) {
            None => {
                self.parameters.insert(name, value);
                return Ok(name.to_string());
            }
            Some(existing) if existing.as_str() == Some(value.as_str()) => {
                return Ok(name.to_string());
            }
            Some(existing) => existing.to_string(),
        };

        match self.policy {
            CollisionPolicy::Overwrite => {
                warn!(parameter = name, "overwriting parameter with a later value");
                self.parameters.insert(name, value);
                Ok(name.to_string())
            }
            CollisionPolicy::Reject => Err(ScriptForgeError::ParameterCollision {
                name: name.to_string(),
                existing,
                incoming: value,
            }),
            CollisionPolicy::Suffix => {
                let mut n = 2;
                loop {
                    let candidate = format!("{}_{}", name, n);
                    match self.parameters.get(&candidate) {
                        None => {
                            warn!(parameter = name, renamed = %candidate, "parameter name already taken");
                            self.parameters.insert(candidate.as_str(), ParamValue::Str(value));
                            return Ok(candidate);
                        }
                        Some(taken) if taken.as_str() == Some(value.as_str()) => {
                            return Ok(candidate);
                        }
                        Some(_) => n += 1,
                    }
                }
            }
        }
    }
}
