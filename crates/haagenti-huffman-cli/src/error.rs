//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Failures surfaced by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline failure.
    #[error(transparent)]
    Huffman(#[from] haagenti_huffman::Error),

    /// File could not be read or written.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has bad values.
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl CliError {
    /// Wrap an I/O failure with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code: 1 for empty input, 2 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Huffman(e) if e.is_empty_input() => 1,
            _ => 2,
        }
    }

    /// Short label for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Huffman(e) => e.category(),
            CliError::Io { .. } => "io_error",
            CliError::Config { .. } => "config_error",
        }
    }
}
