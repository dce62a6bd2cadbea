//! ESENS command-line front-end.
//!
//! Reads notations from the command line, a file or an interactive prompt
//! and prints either readable text or one JSON object per notation.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod telemetry;

pub use cli::Cli;
pub use config::{CliConfig, ConfigError, LogFormat, OutputFormat};
pub use error::{CliError, CliResult};
pub use output::{Session, Settings};

use std::fs::File;
use std::io::{self, BufReader};

/// Merge command-line flags over the loaded config. Flags can only switch
/// JSON output on and explanations off.
pub fn settings(cli: &Cli, config: &CliConfig) -> Settings {
    Settings {
        output: if cli.json {
            OutputFormat::Json
        } else {
            config.output
        },
        explain: config.explain && !cli.no_explain,
        validate_only: cli.validate,
    }
}

/// Run the requested mode and return the number of rejected notations.
/// Interactive sessions always report zero.
pub fn run(cli: &Cli, config: &CliConfig) -> CliResult<usize> {
    let stdout = io::stdout();
    let mut session = Session::new(settings(cli, config), stdout.lock());

    if cli.interactive {
        session.interactive(io::stdin().lock())?;
        return Ok(0);
    }

    if let Some(path) = &cli.file {
        let file = File::open(path).map_err(|source| CliError::NotationFile {
            path: path.clone(),
            source,
        })?;
        session.process_lines(BufReader::new(file))?;
    } else if let Some(notation) = &cli.notation {
        session.process(notation)?;
    }

    tracing::debug!(
        processed = session.processed(),
        failed = session.failed(),
        "run finished"
    );
    Ok(session.failed())
}
