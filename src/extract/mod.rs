//! Python Playwright source → parameterized [`Script`].
//!
//! Extraction runs in two passes. [`extractor`] recognizes calls and
//! records them literally; [`lifting`] then decides which literals become
//! parameters. The naming policy is pluggable through [`ParamNamer`].

pub mod extractor;
pub mod lifting;
pub mod report;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScriptForgeError};
use crate::python::parse_module;
use crate::script::script_model::Script;

pub use extractor::{ExtractedAction, extract_actions};
pub use lifting::{CollisionPolicy, ParamNamer, SelectorParamNamer};
pub use report::{CallOutcome, CallRecord, ExtractionReport, SkipReason};

pub const DEFAULT_NAME: &str = "Playwright Script";
pub const DEFAULT_DESCRIPTION: &str = "Auto-generated from Playwright codegen";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub name: String,
    pub description: String,

    /// Fail when the script calls vocabulary methods but none could be
    /// extracted
    pub strict: bool,

    pub collision: CollisionPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            strict: false,
            collision: CollisionPolicy::default(),
        }
    }
}

/// A script together with the per-call account of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub script: Script,
    pub report: ExtractionReport,
}

/// Extract a script from Python source with default options.
pub fn extract(source: &str) -> Result<Script> {
    Ok(extract_with(source, &ExtractOptions::default(), &SelectorParamNamer)?.script)
}

/// Extract a script from Python source.
///
/// Fails only when the source is not valid Python, or when an opt-in
/// check (strict mode, `reject` collisions) trips.
pub fn extract_with(
    source: &str,
    options: &ExtractOptions,
    namer: &dyn ParamNamer,
) -> Result<Extraction> {
    let module = parse_module(source)?;
    let (extracted, report) = extract_actions(&module);

    if options.strict && extracted.is_empty() && report.vocabulary_calls() > 0 {
        return Err(ScriptForgeError::NothingRecognized {
            calls: report.vocabulary_calls(),
        });
    }

    let (actions, parameters) = lifting::lift(extracted, namer, options.collision)?;
    info!(
        actions = actions.len(),
        parameters = parameters.len(),
        skipped = report.skipped_count(),
        "extracted script"
    );

    let script = Script::new(actions, parameters)
        .with_name(options.name.clone())
        .with_description(options.description.clone());

    Ok(Extraction { script, report })
}
