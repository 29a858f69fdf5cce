//! flinspect CLI entry point

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flinspect::commands::{run_command, CommandContext};
use flinspect::{Cli, FlinspectConfig, FlinspectError};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<FlinspectError>()
                .map(FlinspectError::exit_code)
                .unwrap_or(ExitCode::FAILURE)
        }
    }
}

fn run() -> anyhow::Result<String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FlinspectConfig::load_from(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => FlinspectConfig::load_from(Path::new("flinspect.toml"))?,
    };

    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    // Logs go to stderr so stdout stays clean for --format json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("flinspect={}", level))),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("flinspect v{}", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext::new(cli.format, cli.verbose);
    let output = run_command(&cli.command, &config, &ctx)?;
    Ok(output)
}
