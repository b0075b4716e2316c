use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::extract::report::{CallOutcome, CallRecord};

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub line: usize,
    pub column: usize,
    pub method: String,

    /// `recognized`, `skipped` or `ignored`
    pub outcome: String,

    pub kind: Option<String>,
    pub reason: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, line: usize, column: usize, method: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            line,
            column,
            method: method.to_string(),
            outcome: "ignored".to_string(),
            kind: None,
            reason: None,
        }
    }

    pub fn from_record(step: u64, record: &CallRecord) -> Self {
        let event = Self::now(step, record.line, record.column, &record.method);
        match &record.outcome {
            CallOutcome::Recognized { kind } => event.with_outcome("recognized").with_kind(kind),
            CallOutcome::Skipped { kind, reason } => event
                .with_outcome("skipped")
                .with_kind(kind)
                .with_reason(reason),
            CallOutcome::Ignored => event,
        }
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = outcome.to_string();
        self
    }

    pub fn with_kind(mut self, kind: impl ToString) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn with_reason(mut self, reason: impl ToString) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}
