//! Convert recorded Python Playwright scripts into parameterized YAML
//! action scripts, and compile those back into runnable Python.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod extract;
pub mod python;
pub mod script;
pub mod trace;

pub use codegen::{CodegenOptions, generate, generate_with};
pub use error::{Result, ScriptForgeError};
pub use extract::{ExtractOptions, Extraction, extract, extract_with};
pub use script::{Action, ActionKind, ParamValue, Parameters, Script};
