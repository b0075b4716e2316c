pub mod script_model;

pub use script_model::{Action, ActionKind, ParamValue, Parameters, Script};
