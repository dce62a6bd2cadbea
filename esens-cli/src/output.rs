//! Processing notations and rendering the results.

use crate::config::OutputFormat;
use crate::error::CliResult;
use esens_core::{parse, validate, ParseError};
use serde_json::json;
use std::io::{BufRead, Write};

/// Per-run settings after merging the config file with command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub output: OutputFormat,
    pub explain: bool,
    pub validate_only: bool,
}

/// Writes results for a sequence of notations and tallies failures.
pub struct Session<W: Write> {
    settings: Settings,
    out: W,
    processed: usize,
    failed: usize,
}

impl<W: Write> Session<W> {
    pub fn new(settings: Settings, out: W) -> Self {
        Self {
            settings,
            out,
            processed: 0,
            failed: 0,
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Parse or validate one notation and write the outcome. Returns whether
    /// the notation was accepted.
    pub fn process(&mut self, notation: &str) -> CliResult<bool> {
        self.processed += 1;
        let outcome = if self.settings.validate_only {
            self.write_validation(notation)
        } else {
            self.write_parse(notation)
        };
        match outcome? {
            Ok(()) => Ok(true),
            Err(err) => {
                self.failed += 1;
                tracing::info!(notation, error = %err, "notation rejected");
                self.write_error(notation, &err)?;
                Ok(false)
            }
        }
    }

    /// Process every non-blank line, trimmed.
    pub fn process_lines<R: BufRead>(&mut self, input: R) -> CliResult<()> {
        for line in input.lines() {
            let line = line?;
            let notation = line.trim();
            if !notation.is_empty() {
                self.process(notation)?;
            }
        }
        Ok(())
    }

    /// Prompt-driven loop. Stops at end of input or on `exit`, `quit` or `q`.
    pub fn interactive<R: BufRead>(&mut self, mut input: R) -> CliResult<()> {
        writeln!(self.out, "=== ESENS Interactive Parser ===")?;
        writeln!(self.out, "Enter ESENS notations to parse, or 'exit' to quit.")?;
        writeln!(self.out, "Examples: P+S10%3T, E-D15C, P#Stun1T.RD")?;
        writeln!(self.out)?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }
            let notation = line.trim();
            if matches!(notation.to_ascii_lowercase().as_str(), "exit" | "quit" | "q") {
                break;
            }
            if !notation.is_empty() {
                self.process(notation)?;
            }
        }
        Ok(())
    }

    fn write_validation(&mut self, notation: &str) -> CliResult<Result<(), ParseError>> {
        if let Err(err) = validate(notation) {
            return Ok(Err(err));
        }
        match self.settings.output {
            OutputFormat::Json => {
                let body = json!({"status": "valid", "notation": notation});
                writeln!(self.out, "{}", serde_json::to_string(&body)?)?;
            }
            OutputFormat::Text => writeln!(self.out, "✓ {} is valid", notation)?,
        }
        Ok(Ok(()))
    }

    fn write_parse(&mut self, notation: &str) -> CliResult<Result<(), ParseError>> {
        let output = match parse(notation, self.settings.explain) {
            Ok(output) => output,
            Err(err) => return Ok(Err(err)),
        };
        match self.settings.output {
            OutputFormat::Json => {
                let mut body = json!({
                    "status": "valid",
                    "notation": notation,
                    "parsed": output.structured,
                });
                if let Some(explanation) = output.explanation {
                    body["explanation"] = json!(explanation);
                }
                writeln!(self.out, "{}", serde_json::to_string(&body)?)?;
            }
            OutputFormat::Text => {
                writeln!(self.out, "=== {} ===", notation)?;
                if let Some(explanation) = &output.explanation {
                    writeln!(self.out, "Explanation: {}", explanation)?;
                }
                writeln!(self.out, "Parsed structure:")?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&output.structured)?)?;
                writeln!(self.out)?;
            }
        }
        Ok(Ok(()))
    }

    fn write_error(&mut self, notation: &str, err: &ParseError) -> CliResult<()> {
        match self.settings.output {
            OutputFormat::Json => {
                let body = json!({
                    "status": "error",
                    "notation": notation,
                    "error": err.to_string(),
                    "kind": err.kind,
                    "offset": err.offset,
                });
                writeln!(self.out, "{}", serde_json::to_string(&body)?)?;
            }
            OutputFormat::Text => {
                writeln!(self.out, "Error parsing {}:", notation)?;
                writeln!(self.out, "{}", err.diagnostic())?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}
