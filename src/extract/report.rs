use std::fmt;

use serde::Serialize;

use crate::script::script_model::ActionKind;

/// Why a call to a recognized method was left out of the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkipReason {
    TooFewArguments { required: usize, found: usize },
    /// A required argument is not a constant, e.g. a variable or f-string
    NonLiteralArgument { position: usize },
    /// A required string argument is the empty string
    EmptyArgument { position: usize },
    /// `wait_for_timeout` needs a numeric literal
    NotANumber,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewArguments { required, found } => {
                write!(f, "needs {} positional argument(s), found {}", required, found)
            }
            SkipReason::NonLiteralArgument { position } => {
                write!(f, "argument {} is not a literal", position)
            }
            SkipReason::EmptyArgument { position } => {
                write!(f, "argument {} is empty", position)
            }
            SkipReason::NotANumber => f.write_str("timeout is not a numeric literal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallOutcome {
    Recognized { kind: ActionKind },
    Skipped { kind: ActionKind, reason: SkipReason },
    /// Method name outside the vocabulary
    Ignored,
}

/// One `obj.method(...)` call seen during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub line: usize,
    pub column: usize,
    pub method: String,
    #[serde(flatten)]
    pub outcome: CallOutcome,
}

/// What extraction did with each method call in the source, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub calls: Vec<CallRecord>,
}

impl ExtractionReport {
    pub fn record(&mut self, line: usize, column: usize, method: &str, outcome: CallOutcome) {
        self.calls.push(CallRecord {
            line,
            column,
            method: method.to_string(),
            outcome,
        });
    }

    pub fn recognized_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c.outcome, CallOutcome::Recognized { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c.outcome, CallOutcome::Skipped { .. }))
            .count()
    }

    pub fn ignored_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c.outcome, CallOutcome::Ignored))
            .count()
    }

    /// Calls whose method is in the vocabulary, extracted or not.
    pub fn vocabulary_calls(&self) -> usize {
        self.recognized_count() + self.skipped_count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&CallRecord, &SkipReason)> {
        self.calls.iter().filter_map(|c| match &c.outcome {
            CallOutcome::Skipped { reason, .. } => Some((c, reason)),
            _ => None,
        })
    }

    /// One-line summary for diagnostics.
    pub fn summary(&self) -> String {
        format!(
            "{} recognized, {} skipped, {} ignored",
            self.recognized_count(),
            self.skipped_count(),
            self.ignored_count()
        )
    }
}
