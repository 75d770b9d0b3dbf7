//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use exprcheck_core::types::TypeCategory;
use exprcheck_syntax::ast::Tree;

use crate::checker::{self, CheckError};
use crate::env::Config;

use super::{CliError, CliResult, ExitCode};

/// Maximum tree file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while deserializing.
const MAX_TREE_SIZE: u64 = 100 * 1024 * 1024;

/// Options of the `check` subcommand.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub tree: PathBuf,
    pub env: Option<PathBuf>,
    pub strict: bool,
    pub expect: Option<TypeCategory>,
    pub dump_types: bool,
    pub report: bool,
}

/// Read a file, refusing anything over [`MAX_TREE_SIZE`].
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_TREE_SIZE {
        return Err(CliError::failure(format!(
            "File '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_TREE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Parse a serialized tree.
pub fn load_tree(file_path: &Path) -> CliResult<Tree> {
    let json = read_source(file_path)?;
    serde_json::from_str(&json)
        .map_err(|e| CliError::failure(format!("Invalid tree file '{}': {}", file_path.display(), e)))
}

/// Build the environment config: the `--env` file (or an empty registry), then the command-line overrides.
pub fn load_config(options: &CheckOptions) -> CliResult<Config> {
    let mut config = match &options.env {
        Some(path) => Config::from_path(path).map_err(|e| CliError::failure(format!("Error: {}", e)))?,
        None => Config::new(),
    };
    if options.strict {
        config = config.with_strict(true);
    }
    if let Some(expect) = options.expect {
        config = config.with_expect(expect);
    }
    Ok(config)
}

/// Type check a tree file and print its type (or its annotated tree).
pub fn check_file(options: &CheckOptions) -> CliResult<ExitCode> {
    let mut tree = load_tree(&options.tree)?;
    let config = load_config(options)?;

    tracing::debug!(tree = %options.tree.display(), strict = config.strict, "checking tree file");
    let result = checker::check(&mut tree, &config);

    if options.dump_types {
        let json = serde_json::to_string_pretty(&tree)
            .map_err(|e| CliError::failure(format!("Error serializing tree: {}", e)))?;
        println!("{}", json);
    }

    match result {
        Ok(ty) => {
            if !options.dump_types {
                println!("{}", ty);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(CliError::failure(render_error(err, options.report))),
    }
}

/// Render a check error: its plain message with the caret snippet, or a labelled miette report.
pub fn render_error(err: CheckError, report: bool) -> String {
    if report {
        format!("{:?}", miette::Report::new(err))
    } else {
        err.to_string()
    }
}
