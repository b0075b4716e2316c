use clap::Parser;
use scriptforge::cli::commands::{cmd_extract, cmd_generate, cmd_roundtrip};
use scriptforge::cli::config::{
    Cli, Commands, build_codegen_options, build_extract_options, load_config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Extract {
            input,
            output,
            name,
            description,
            strict,
            collision,
            trace,
        } => {
            let options = build_extract_options(
                name.as_deref(),
                description.as_deref(),
                strict,
                collision,
                &config.extract,
            );
            cmd_extract(&input, output.as_deref(), &options, trace.as_deref(), cli.verbose)?;
        }
        Commands::Generate {
            input,
            output,
            params,
            browser,
            headed,
        } => {
            let options = build_codegen_options(browser, headed, &config.codegen);
            cmd_generate(&input, output.as_deref(), &params, &options)?;
        }
        Commands::Roundtrip { input, output } => {
            let extract_options = build_extract_options(None, None, false, None, &config.extract);
            let codegen_options = build_codegen_options(None, false, &config.codegen);
            cmd_roundtrip(&input, output.as_deref(), &extract_options, &codegen_options)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` steps from warn up to trace.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
