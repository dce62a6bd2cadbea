//! ESENS CLI entry point.

use clap::{CommandFactory, Parser};
use esens_cli::telemetry::init_tracing;
use esens_cli::{run, Cli, CliConfig, CliError};
use std::process::ExitCode;

/// Usage, I/O and configuration failures.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.has_input() {
        // No notation, file or prompt requested.
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(EXIT_USAGE);
    }

    match start(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn start(cli: &Cli) -> Result<usize, CliError> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config)?;
    run(cli, &config)
}
