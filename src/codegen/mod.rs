//! Parameterized [`Script`](crate::script::Script) → Python Playwright source.

pub mod escape;
pub mod generator;
pub mod placeholder;

pub use generator::{BrowserType, CodeGenerator, CodegenOptions, generate, generate_with};
