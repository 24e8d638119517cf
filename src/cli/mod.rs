//! CLI module for stylescan
//!
//! This module provides the command-line interface for inspecting scans.
//!
//! ## Commands
//!
//! - `lines <file>` - Print the document's line table
//! - `walk <file>` - Step a cursor over a range and print what it sees at every position
//! - `runs <file>` - Lex a range with the generic lexer and print the committed style runs
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, ScanConfig, encoding_from_name};
use crate::version::STYLESCAN_VERSION;
use stylescan_core::StateMask;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The request itself was invalid (bad range, bad encoding).
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::usage(format!("Error: {err}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Inspect incremental style-run scans
#[derive(Parser, Debug)]
#[command(name = "stylescan")]
#[command(version = STYLESCAN_VERSION)]
#[command(about = "Inspect incremental style-run scans", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the line table: start, terminator offset and text of every line
    Lines {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Walk a cursor over the range and print one row per character
    Walk {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Lex the range with the generic lexer and print the committed runs
    Runs {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Document and range options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Document to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Text encoding: utf8, 8bit or dbcs
    #[arg(long, default_value = "utf8")]
    pub encoding: String,

    /// Code page for the dbcs encoding (932, 936, 949, 950)
    #[arg(long = "code-page", value_name = "N")]
    pub code_page: Option<u32>,

    /// First byte of the range
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Bytes in the range (default: to the end of the document)
    #[arg(long)]
    pub length: Option<usize>,

    /// Initial state (default: the style just before the start)
    #[arg(long, value_name = "N", value_parser = parse_number)]
    pub state: Option<u32>,

    /// Category bits of the initial state, decimal or 0x-prefixed hex
    #[arg(long, value_name = "BITS", value_parser = parse_number)]
    pub mask: Option<u32>,

    /// Whitespace-separated keywords for the generic lexer
    #[arg(long, value_name = "WORDS", default_value = "")]
    pub keywords: String,

    /// Move the start back to the beginning of its line
    #[arg(long)]
    pub restart: bool,
}

impl ScanArgs {
    pub fn to_config(&self) -> Result<ScanConfig, ConfigError> {
        let mut config = ScanConfig::new()
            .with_encoding(encoding_from_name(&self.encoding, self.code_page)?)
            .with_start(self.start)
            .with_keywords(&self.keywords)
            .with_restart_at_line(self.restart);
        if let Some(length) = self.length {
            config = config.with_length(length);
        }
        if let Some(state) = self.state {
            config = config.with_initial_state(state);
        }
        if let Some(mask) = self.mask {
            config = config.with_state_mask(StateMask::new(mask));
        }
        Ok(config)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal number.
fn parse_number(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lines { scan } => commands::lines(&scan),
        Command::Walk { scan } => commands::walk(&scan),
        Command::Runs { scan } => commands::runs(&scan),
    }
}

// ============================================================================
// Tests
// ============================================================================
