//! CLI module for exprcheck
//!
//! ## Commands
//!
//! - `check <tree.json>` - Type check a serialized expression tree against an environment description
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

use clap::{Parser, Subcommand};
use exprcheck_core::types::TypeCategory;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Static type checker for expression trees
#[derive(Parser, Debug)]
#[command(name = "exprcheck")]
#[command(version = VERSION)]
#[command(about = "Static type checker for expression trees", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Type check a serialized expression tree
    Check {
        /// JSON file holding the tree (`source` and root `node`)
        #[arg(value_name = "TREE")]
        tree: PathBuf,
        /// JSON file describing the environment (types, operators, strict, ...)
        #[arg(long, value_name = "ENV")]
        env: Option<PathBuf>,
        /// Reject identifiers the environment does not declare
        #[arg(long)]
        strict: bool,
        /// Require the result to be of this category (e.g. `bool`, `int`, `float`)
        #[arg(long, value_name = "CATEGORY")]
        expect: Option<TypeCategory>,
        /// Print the annotated tree as JSON instead of the result type
        #[arg(long)]
        dump_types: bool,
        /// Render errors as a report with a labelled source snippet
        #[arg(long)]
        report: bool,
    },
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
        Command::Check {
            tree,
            env,
            strict,
            expect,
            dump_types,
            report,
        } => commands::check_file(&commands::CheckOptions {
            tree,
            env,
            strict,
            expect,
            dump_types,
            report,
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
