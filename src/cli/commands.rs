use std::path::Path;

use tracing::info;

use crate::codegen::{CodegenOptions, generate_with};
use crate::error::{Result, ScriptForgeError};
use crate::extract::{ExtractOptions, Extraction, SelectorParamNamer, extract_with};
use crate::script::script_model::{ParamValue, Parameters, Script};
use crate::trace::logger::TraceLogger;

// ============================================================================
// extract subcommand
// ============================================================================

pub fn cmd_extract(
    input: &str,
    output: Option<&str>,
    options: &ExtractOptions,
    trace: Option<&str>,
    verbose: u8,
) -> Result<Extraction> {
    let source = read_file(input)?;
    let extraction = extract_with(&source, options, &SelectorParamNamer)?;

    let logger = trace.map_or_else(TraceLogger::disabled, TraceLogger::new);
    logger.log_report(&extraction.report);

    if verbose > 0 {
        for (record, reason) in extraction.report.skipped() {
            eprintln!(
                "  skipped {}() at {}:{}: {}",
                record.method, record.line, record.column, reason
            );
        }
    }

    let yaml = serde_yaml::to_string(&extraction.script).map_err(|source| ScriptForgeError::Yaml {
        context: "serializing script".to_string(),
        source,
    })?;
    write_output(output, &yaml)?;

    eprintln!("{}: {}", input, extraction.report.summary());
    Ok(extraction)
}

// ============================================================================
// generate subcommand
// ============================================================================

/// `params` are `KEY=VALUE` overrides merged over the script's own
/// parameters.
pub fn cmd_generate(
    input: &str,
    output: Option<&str>,
    params: &[String],
    options: &CodegenOptions,
) -> Result<String> {
    let script = load_script(input)?;
    let overrides = parse_params(params)?;
    let merged = script.parameters.merged(&overrides);

    let code = generate_with(&script, Some(&merged), options);
    write_output(output, &code)?;

    info!(input, actions = script.actions.len(), "generated script");
    Ok(code)
}

// ============================================================================
// roundtrip subcommand
// ============================================================================

pub fn cmd_roundtrip(
    input: &str,
    output: Option<&str>,
    extract_options: &ExtractOptions,
    codegen_options: &CodegenOptions,
) -> Result<String> {
    let source = read_file(input)?;
    let extraction = extract_with(&source, extract_options, &SelectorParamNamer)?;
    let code = generate_with(&extraction.script, None, codegen_options);
    write_output(output, &code)?;

    eprintln!("{}: {}", input, extraction.report.summary());
    Ok(code)
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a YAML action script.
pub fn load_script(path: &str) -> Result<Script> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|source| ScriptForgeError::Yaml {
        context: path.to_string(),
        source,
    })
}

/// Parse one `KEY=VALUE` override. The value is kept as a string and may
/// itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(String, ParamValue)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), ParamValue::from(value)))
        }
        _ => Err(ScriptForgeError::InvalidParam(raw.to_string())),
    }
}

pub fn parse_params(raw: &[String]) -> Result<Parameters> {
    let mut params = Parameters::new();
    for entry in raw {
        let (key, value) = parse_param(entry)?;
        params.insert(key, value);
    }
    Ok(params)
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ScriptForgeError::Io {
        context: format!("reading {}", path),
        source,
    })
}

/// Write to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = Path::new(p).parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| ScriptForgeError::Io {
                    context: format!("creating {}", parent.display()),
                    source,
                })?;
            }
            std::fs::write(p, content).map_err(|source| ScriptForgeError::Io {
                context: format!("writing {}", p),
                source,
            })
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
