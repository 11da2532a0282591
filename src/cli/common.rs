//! Shared CLI plumbing: error type, exit codes and data directory handling.

use crate::config::Config;
use crate::models::{GridError, RosterError};
use crate::services::{is_invalid_data, AppData, DataStore};
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad arguments, failed validation)
    Validation = 1,
    /// Reading or writing files failed
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code category
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<RosterError> for CliError {
    fn from(err: RosterError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// `--data-dir` option shared by every command that touches data files.
#[derive(Debug, Clone, Default, Args)]
pub struct DataDirArg {
    /// Directory holding the data files (defaults to the configured one)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl DataDirArg {
    /// Loads the configuration and resolves the data store.
    pub fn open(&self) -> CliResult<(Config, DataStore)> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let dir = config
            .resolve_data_dir(self.data_dir.as_deref())
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;
        Ok((config, DataStore::new(dir)))
    }
}

/// Loads all data from `store`.
///
/// Files whose content is rejected (unknown level, out-of-range grid,
/// conflicting courts) are validation failures; unreadable or malformed
/// files are I/O failures.
pub fn load_data(store: &DataStore) -> CliResult<AppData> {
    store.load().map_err(|e| {
        let message = format!("Failed to load data: {e:#}");
        if is_invalid_data(&e) {
            CliError::validation(message)
        } else {
            CliError::io(message)
        }
    })
}

/// Saves all data to `store`.
pub fn save_data(store: &DataStore, data: &AppData) -> CliResult<()> {
    store
        .save(data)
        .map_err(|e| CliError::io(format!("Failed to save data: {e:#}")))
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code(), 1);
        assert_eq!(CliError::io("x").exit_code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_domain_errors_are_validation_failures() {
        let err = CliError::from(GridError::UnknownCourt(9));
        assert_eq!(err.kind, ExitCode::Validation);
        assert_eq!(err.message, "court 9 not found");

        let err = CliError::from(RosterError::EmptyName);
        assert_eq!(err.kind, ExitCode::Validation);
    }
}
