//! Statistics for Huffman encoding runs.

use crate::bits::padding_bits;

/// Statistics from an encode operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStats {
    /// Symbols in the input.
    pub original_symbols: usize,

    /// Distinct symbols in the code table.
    pub distinct_symbols: usize,

    /// Exact payload length in bits, before padding.
    pub bit_count: usize,

    /// Packed payload size in bytes.
    pub payload_bytes: usize,

    /// Serialized tree size in bytes.
    pub tree_bytes: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero bits appended to the payload by packing.
    pub fn padding_bits(&self) -> usize {
        padding_bits(self.bit_count)
    }

    /// Average code length over the input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_symbols == 0 {
            return 0.0;
        }
        self.bit_count as f64 / self.original_symbols as f64
    }

    /// Payload plus tree, the bytes a receiver needs.
    pub fn total_bytes(&self) -> usize {
        self.payload_bytes + self.tree_bytes
    }

    /// Compressed size relative to `original_bytes` (lower is better).
    pub fn ratio(&self, original_bytes: usize) -> f64 {
        if original_bytes == 0 {
            return 0.0;
        }
        self.total_bytes() as f64 / original_bytes as f64
    }

    /// Space savings as a percentage of `original_bytes`.
    pub fn savings_percent(&self, original_bytes: usize) -> f64 {
        if original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.ratio(original_bytes)) * 100.0
    }
}
