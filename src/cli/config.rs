use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::codegen::{BrowserType, CodegenOptions};
use crate::extract::{CollisionPolicy, DEFAULT_DESCRIPTION, DEFAULT_NAME, ExtractOptions};

pub const DEFAULT_CONFIG_PATH: &str = "scriptforge.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "scriptforge",
    version,
    about = "Turn recorded Playwright scripts into parameterized templates and back"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: scriptforge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a YAML action script from a Python Playwright script
    Extract {
        /// Python script to read
        #[arg(long)]
        input: String,

        /// Output YAML path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Script name written into the YAML
        #[arg(long)]
        name: Option<String>,

        /// Script description written into the YAML
        #[arg(long)]
        description: Option<String>,

        /// Fail if automation calls exist but none could be extracted
        #[arg(long)]
        strict: bool,

        /// What to do when two values want the same parameter name
        #[arg(long, value_enum)]
        collision: Option<CollisionPolicy>,

        /// Append one JSONL event per visited call to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Generate a Python Playwright script from a YAML action script
    Generate {
        /// YAML script to read
        #[arg(long)]
        input: String,

        /// Output Python path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Parameter override KEY=VALUE (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Browser engine to launch
        #[arg(long, value_enum)]
        browser: Option<BrowserType>,

        /// Launch the browser with a visible window
        #[arg(long)]
        headed: bool,
    },

    /// Extract and regenerate a Python script in one step
    Roundtrip {
        /// Python script to read
        #[arg(long)]
        input: String,

        /// Output Python path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `scriptforge.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub collision: CollisionPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            strict: false,
            collision: CollisionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default)]
    pub browser: BrowserType,

    #[serde(default = "default_true")]
    pub headless: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            browser: BrowserType::default(),
            headless: true,
        }
    }
}

// Serde default helpers
fn default_name() -> String { DEFAULT_NAME.to_string() }
fn default_description() -> String { DEFAULT_DESCRIPTION.to_string() }
fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// CLI values win over the config file; `--strict` can only turn strict on.
pub fn build_extract_options(
    name: Option<&str>,
    description: Option<&str>,
    strict: bool,
    collision: Option<CollisionPolicy>,
    config: &ExtractConfig,
) -> ExtractOptions {
    ExtractOptions {
        name: name.unwrap_or(&config.name).to_string(),
        description: description.unwrap_or(&config.description).to_string(),
        strict: strict || config.strict,
        collision: collision.unwrap_or(config.collision),
    }
}

/// `--headed` forces a visible browser regardless of the config file.
pub fn build_codegen_options(
    browser: Option<BrowserType>,
    headed: bool,
    config: &CodegenConfig,
) -> CodegenOptions {
    CodegenOptions {
        browser: browser.unwrap_or(config.browser),
        headless: !headed && config.headless,
    }
}
