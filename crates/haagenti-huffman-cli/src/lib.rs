//! Command-line front end for `haagenti-huffman`.
//!
//! Compresses text files into a payload file and a tree file, and restores
//! them. See the `haagenti-huffman` binary for usage.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{decode, encode, DecodeOptions, EncodeOptions, EncodeReport};
pub use config::{Config, UnmappedMode};
pub use error::{CliError, CliResult};
