use thiserror::Error;

use crate::python::SyntaxError;

#[derive(Debug, Error)]
pub enum ScriptForgeError {
    /// The script is not parseable Python; no partial result is produced
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The Python grammar could not be loaded, or parsing did not finish
    #[error("Python parser unavailable: {0}")]
    Parser(String),

    /// Two actions lifted different values under the same parameter name
    /// and the collision policy is `reject`
    #[error("parameter '{name}' would hold both {existing:?} and {incoming:?}")]
    ParameterCollision {
        name: String,
        existing: String,
        incoming: String,
    },

    /// Strict extraction found automation calls but none could be represented
    #[error("none of the {calls} automation call(s) in the script could be extracted")]
    NothingRecognized { calls: usize },

    #[error("I/O error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `--param` override that is not of the form `KEY=VALUE`
    #[error("invalid parameter override '{0}': expected KEY=VALUE")]
    InvalidParam(String),
}

pub type Result<T> = std::result::Result<T, ScriptForgeError>;
