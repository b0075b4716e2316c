use tracing::debug;

use crate::python::ast::{Call, Constant, Expr, Module};
use crate::script::script_model::{Action, ActionKind, default_screenshot_path};

use super::report::{CallOutcome, ExtractionReport, SkipReason};

/// An action as written in the source, before any parameter lifting.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedAction {
    pub action: Action,

    /// Whether the literal may be lifted into a parameter. Only set for
    /// navigation targets that are not in-page anchors.
    pub parameterizable: bool,

    pub line: usize,
}

// ============================================================================
// Call scanning
// ============================================================================

/// Scan every method call in the module, in document order, and extract
/// one action per call that matches the vocabulary.
///
/// Never fails: calls that cannot be represented are left out and noted
/// in the report.
pub fn extract_actions(module: &Module) -> (Vec<ExtractedAction>, ExtractionReport) {
    let mut actions = Vec::new();
    let mut report = ExtractionReport::default();

    for call in module.calls() {
        let method = call.method_name();
        let Some(kind) = ActionKind::from_method(method) else {
            report.record(call.line, call.column, method, CallOutcome::Ignored);
            continue;
        };

        match extract_call(kind, call) {
            Ok(extracted) => {
                report.record(call.line, call.column, method, CallOutcome::Recognized { kind });
                actions.push(extracted);
            }
            Err(reason) => {
                debug!(line = call.line, method, %reason, "skipping call");
                report.record(call.line, call.column, method, CallOutcome::Skipped { kind, reason });
            }
        }
    }

    (actions, report)
}

/// Build the action for a call already known to be of `kind`.
pub fn extract_call(kind: ActionKind, call: &Call) -> Result<ExtractedAction, SkipReason> {
    let args = CallArgs::new(kind, call)?;
    let mut parameterizable = false;

    let action = match kind {
        ActionKind::Navigate => {
            let url = args.required(0)?;
            parameterizable = is_parameterizable(&url);
            Action::Navigate { url }
        }
        ActionKind::Click => Action::Click {
            selector: args.required(0)?,
        },
        ActionKind::Fill => Action::Fill {
            selector: args.required(0)?,
            value: args.optional(1),
        },
        ActionKind::Type => Action::Type {
            selector: args.required(0)?,
            text: args.optional(1),
        },
        ActionKind::Press => Action::Press {
            selector: args.required(0)?,
            key: args.required(1)?,
        },
        ActionKind::Select => Action::Select {
            selector: args.required(0)?,
            value: args.optional(1),
        },
        ActionKind::Check => Action::Check {
            selector: args.required(0)?,
        },
        ActionKind::Uncheck => Action::Uncheck {
            selector: args.required(0)?,
        },
        ActionKind::Hover => Action::Hover {
            selector: args.required(0)?,
        },
        ActionKind::Wait => Action::Wait {
            selector: args.required(0)?,
        },
        ActionKind::WaitTimeout => Action::WaitTimeout {
            timeout: args.number(0)?,
        },
        ActionKind::Screenshot => Action::Screenshot {
            path: call
                .keyword("path")
                .and_then(literal_text)
                .filter(|path| !path.is_empty())
                .unwrap_or_else(default_screenshot_path),
        },
    };

    Ok(ExtractedAction {
        action,
        parameterizable,
        line: call.line,
    })
}

/// A navigation target is worth parameterizing unless it is an in-page
/// anchor such as `#section`.
pub fn is_parameterizable(url: &str) -> bool {
    !url.is_empty() && !url.starts_with('#')
}

/// Text of a constant argument. Anything else (names, f-strings,
/// expressions) has no literal value.
pub fn literal_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Constant(constant) => Some(constant.to_text()),
        _ => None,
    }
}

// ============================================================================
// Positional argument access
// ============================================================================

struct CallArgs<'a> {
    args: &'a [Expr],
}

impl<'a> CallArgs<'a> {
    fn new(kind: ActionKind, call: &'a Call) -> Result<Self, SkipReason> {
        let required = kind.min_args();
        if call.args.len() < required {
            return Err(SkipReason::TooFewArguments {
                required,
                found: call.args.len(),
            });
        }
        Ok(Self { args: &call.args })
    }

    /// A literal, non-empty string argument.
    fn required(&self, index: usize) -> Result<String, SkipReason> {
        let position = index + 1;
        match self.args.get(index).and_then(literal_text) {
            None => Err(SkipReason::NonLiteralArgument { position }),
            Some(text) if text.is_empty() => Err(SkipReason::EmptyArgument { position }),
            Some(text) => Ok(text),
        }
    }

    /// A literal argument, or the empty string when it has no literal value.
    fn optional(&self, index: usize) -> String {
        self.args
            .get(index)
            .and_then(literal_text)
            .unwrap_or_default()
    }

    fn number(&self, index: usize) -> Result<serde_json::Number, SkipReason> {
        match self.args.get(index) {
            Some(Expr::Constant(Constant::Int(value))) => Ok(serde_json::Number::from(*value)),
            Some(Expr::Constant(Constant::Float(value))) => {
                serde_json::Number::from_f64(*value).ok_or(SkipReason::NotANumber)
            }
            _ => Err(SkipReason::NotANumber),
        }
    }
}
