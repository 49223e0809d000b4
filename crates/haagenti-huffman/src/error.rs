//! Error types for Huffman coding operations.

use thiserror::Error;

/// Result type alias for Huffman operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Huffman coding error types.
#[derive(Debug, Error)]
pub enum Error {
    /// No symbols to analyze.
    #[error("empty input: nothing to analyze")]
    EmptyInput,

    /// A frequency table entry with a zero count, or counts whose sum
    /// does not fit in a `u64`.
    #[error("invalid frequency for symbol {symbol}: {reason}")]
    InvalidFrequency { symbol: String, reason: &'static str },

    /// Encoder met a symbol that has no code.
    #[error("unmapped symbol {symbol} at position {position}")]
    UnmappedSymbol { symbol: String, position: usize },

    /// Serialized tree is truncated, invalid, or has trailing bytes.
    #[error("malformed tree: {message} at bit {bit_offset}")]
    MalformedTree { message: String, bit_offset: usize },

    /// Payload ran out of bits before the requested symbol count.
    #[error("truncated payload: expected {expected} symbols, decoded {decoded}")]
    TruncatedPayload { expected: usize, decoded: usize },

    /// I/O error from underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed tree error at a bit offset.
    pub fn malformed(message: impl Into<String>, bit_offset: usize) -> Self {
        Error::MalformedTree {
            message: message.into(),
            bit_offset,
        }
    }

    /// Create an unmapped symbol error.
    pub fn unmapped(symbol: &impl core::fmt::Debug, position: usize) -> Self {
        Error::UnmappedSymbol {
            symbol: format!("{symbol:?}"),
            position,
        }
    }

    /// Check if the error came from analyzing an empty input.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Error::EmptyInput)
    }

    /// Get error category for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Error::EmptyInput => "empty_input",
            Error::InvalidFrequency { .. } => "invalid_frequency",
            Error::UnmappedSymbol { .. } => "unmapped_symbol",
            Error::MalformedTree { .. } => "malformed_tree",
            Error::TruncatedPayload { .. } => "truncated_payload",
            Error::Io(_) => "io_error",
        }
    }
}
