//! Tool configuration.

use std::path::Path;

use serde::Deserialize;

use haagenti_huffman::UnmappedPolicy;

use crate::error::{CliError, CliResult};

/// How the encoder treats characters missing from a supplied tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedMode {
    /// Fail with an error.
    #[default]
    Strict,
    /// Replace with `fallback_symbol`.
    Substitute,
}

/// Configuration file contents. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Unmapped character handling
    #[serde(default)]
    pub unmapped: UnmappedMode,

    /// Replacement character for `substitute` mode
    #[serde(default = "default_fallback_symbol")]
    pub fallback_symbol: char,

    /// Extension appended to the output path to name the tree file
    #[serde(default = "default_tree_extension")]
    pub tree_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            unmapped: UnmappedMode::default(),
            fallback_symbol: default_fallback_symbol(),
            tree_extension: default_tree_extension(),
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Encoder policy for this configuration.
    pub fn policy(&self) -> UnmappedPolicy<char> {
        match self.unmapped {
            UnmappedMode::Strict => UnmappedPolicy::Strict,
            UnmappedMode::Substitute => UnmappedPolicy::Substitute(self.fallback_symbol),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_symbol() -> char {
    ' '
}

fn default_tree_extension() -> String {
    "tree".to_string()
}
