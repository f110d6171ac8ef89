//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Some sentences could not be parsed
    ParseFailures(usize),
    /// Some input files could not be read
    UnreadableFiles(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ParseFailures(1) => write!(f, "1 sentence could not be parsed"),
            CliError::ParseFailures(count) => write!(f, "{count} sentences could not be parsed"),
            CliError::UnreadableFiles(1) => write!(f, "1 input file could not be read"),
            CliError::UnreadableFiles(count) => write!(f, "{count} input files could not be read"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
