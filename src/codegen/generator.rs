use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::script::script_model::{Action, Parameters, Script};

use super::escape::quoted;
use super::placeholder::resolve;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BrowserType {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserType {
    pub fn as_str(self) -> &'static str {
        match self {
            BrowserType::Chromium => "chromium",
            BrowserType::Firefox => "firefox",
            BrowserType::Webkit => "webkit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenOptions {
    pub browser: BrowserType,
    pub headless: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            browser: BrowserType::Chromium,
            headless: true,
        }
    }
}

/// Compiles a script's actions into a runnable Playwright program.
pub struct CodeGenerator<'a> {
    params: &'a Parameters,
    options: &'a CodegenOptions,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(params: &'a Parameters, options: &'a CodegenOptions) -> Self {
        Self { params, options }
    }

    /// The full program: preamble, one statement per action, epilogue.
    pub fn compile(&self, actions: &[Action]) -> String {
        let mut lines: Vec<String> = vec![
            "from playwright.sync_api import sync_playwright".into(),
            String::new(),
            "def run(playwright):".into(),
            format!(
                "{}browser = playwright.{}.launch(headless={})",
                INDENT,
                self.options.browser.as_str(),
                if self.options.headless { "True" } else { "False" }
            ),
            format!("{}context = browser.new_context()", INDENT),
            format!("{}page = context.new_page()", INDENT),
            String::new(),
        ];

        let mut emitted = 0;
        for action in actions {
            match self.statement(action) {
                Some(statement) => {
                    lines.push(format!("{}{}", INDENT, statement));
                    emitted += 1;
                }
                None => debug!(?action, "no statement for action"),
            }
        }

        lines.extend([
            String::new(),
            format!("{}context.close()", INDENT),
            format!("{}browser.close()", INDENT),
            String::new(),
            "if __name__ == '__main__':".into(),
            format!("{}with sync_playwright() as playwright:", INDENT),
            format!("{}{}run(playwright)", INDENT, INDENT),
        ]);

        info!(statements = emitted, skipped = actions.len() - emitted, "generated program");
        lines.join("\n")
    }

    /// The `page.*` statement for one action, or `None` for unknown kinds.
    pub fn statement(&self, action: &Action) -> Option<String> {
        let statement = match action {
            Action::Navigate { url } => format!("page.goto({})", self.literal(url)),
            Action::Click { selector } => format!("page.click({})", self.literal(selector)),
            Action::Fill { selector, value } => format!(
                "page.fill({}, {})",
                self.literal(selector),
                self.literal(value)
            ),
            Action::Type { selector, text } => format!(
                "page.type({}, {})",
                self.literal(selector),
                self.literal(text)
            ),
            Action::Press { selector, key } => format!(
                "page.press({}, {})",
                self.literal(selector),
                self.literal(key)
            ),
            Action::Select { selector, value } => format!(
                "page.select_option({}, {})",
                self.literal(selector),
                self.literal(value)
            ),
            Action::Check { selector } => format!("page.check({})", self.literal(selector)),
            Action::Uncheck { selector } => format!("page.uncheck({})", self.literal(selector)),
            Action::Hover { selector } => format!("page.hover({})", self.literal(selector)),
            Action::Wait { selector } => {
                format!("page.wait_for_selector({})", self.literal(selector))
            }
            Action::WaitTimeout { timeout } => format!("page.wait_for_timeout({})", timeout),
            Action::Screenshot { path } => format!("page.screenshot(path={})", self.literal(path)),
            Action::Unknown => return None,
        };
        Some(statement)
    }

    /// Resolve placeholders, then quote and escape.
    fn literal(&self, raw: &str) -> String {
        quoted(&resolve(raw, self.params))
    }
}

/// Generate a program from a script using its own parameters.
pub fn generate(script: &Script) -> String {
    generate_with(script, None, &CodegenOptions::default())
}

/// Generate a program. When `overrides` is given it replaces the
/// script's parameter mapping entirely.
pub fn generate_with(
    script: &Script,
    overrides: Option<&Parameters>,
    options: &CodegenOptions,
) -> String {
    let params = overrides.unwrap_or(&script.parameters);
    CodeGenerator::new(params, options).compile(&script.actions)
}
