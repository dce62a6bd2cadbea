//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Parse and validate Enhanced Status Effect Notation System (ESENS) strings.
#[derive(Debug, Parser)]
#[command(name = "esens", version, about = "Parse and validate ESENS status-effect notation")]
pub struct Cli {
    /// The ESENS notation to parse
    pub notation: Option<String>,

    /// File containing ESENS notations, one per line
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Only validate syntax, don't show parsed results
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Disable human-readable explanations
    #[arg(long)]
    pub no_explain: bool,

    /// Output in JSON format
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Run in interactive mode
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Path to a TOML config file (defaults to $ESENS_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Whether any input source was given.
    pub fn has_input(&self) -> bool {
        self.interactive || self.file.is_some() || self.notation.is_some()
    }
}
