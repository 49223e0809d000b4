//! End-to-end Huffman pipeline.
//!
//! ```text
//! encode: symbols → FrequencyTable → HuffmanTree → CodeTable → Encoder → pack
//!                                        └──────→ tree_codec::serialize
//! decode: tree bytes → tree_codec::deserialize ─┐
//!         payload    → unpack ──────────────────┴→ Decoder
//! ```
//!
//! Payload and tree are raw byte buffers with no header. The exact bit and
//! symbol counts are returned next to them in [`Encoded`]; keeping the
//! symbol count is what allows [`HuffmanCodec::decode_exact`].

use std::time::Instant;

use crate::bits::{pack, unpack};
use crate::decoder::Decoder;
use crate::encoder::{Encoder, UnmappedPolicy};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;
use crate::symbol::Symbol;
use crate::table::CodeTable;
use crate::tree::HuffmanTree;
use crate::tree_codec;

/// Output of an encode run.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Packed code bits, zero-padded to a whole byte.
    pub payload: Vec<u8>,
    /// Serialized tree.
    pub tree: Vec<u8>,
    /// Exact payload length in bits.
    pub bit_count: usize,
    /// Number of symbols encoded.
    pub symbol_count: usize,
    pub stats: CompressionStats,
}

/// Static Huffman codec.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanCodec<S: Symbol> {
    policy: UnmappedPolicy<S>,
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Create a codec with the strict unmapped-symbol policy.
    pub fn new() -> Self {
        Self {
            policy: UnmappedPolicy::Strict,
        }
    }

    /// Create with an unmapped-symbol policy.
    ///
    /// The policy only matters for [`HuffmanCodec::encode_with_tree`]: a
    /// tree built from the input itself covers every symbol.
    pub fn with_policy(policy: UnmappedPolicy<S>) -> Self {
        Self { policy }
    }

    /// Build a tree for `input` and encode with it.
    pub fn encode(&self, input: &[S]) -> Result<Encoded> {
        let start = Instant::now();
        let frequencies = FrequencyTable::analyze(input)?;
        let tree = HuffmanTree::build(&frequencies);
        self.encode_inner(input, &tree, start)
    }

    /// Encode `input` with an existing tree, e.g. one read from a tree file.
    pub fn encode_with_tree(&self, input: &[S], tree: &HuffmanTree<S>) -> Result<Encoded> {
        self.encode_inner(input, tree, Instant::now())
    }

    fn encode_inner(&self, input: &[S], tree: &HuffmanTree<S>, start: Instant) -> Result<Encoded> {
        let table = CodeTable::from_tree(tree);
        let bits = Encoder::new(&table).with_policy(self.policy).encode(input)?;
        let payload = pack(&bits);
        let tree_bytes = tree_codec::serialize(tree);

        let stats = CompressionStats {
            original_symbols: input.len(),
            distinct_symbols: table.len(),
            bit_count: bits.len(),
            payload_bytes: payload.len(),
            tree_bytes: tree_bytes.len(),
            time_us: start.elapsed().as_micros() as u64,
        };

        tracing::debug!(
            symbols = stats.original_symbols,
            distinct = stats.distinct_symbols,
            bits = stats.bit_count,
            padding = stats.padding_bits(),
            payload_bytes = stats.payload_bytes,
            tree_bytes = stats.tree_bytes,
            "huffman encode complete"
        );

        Ok(Encoded {
            payload,
            tree: tree_bytes,
            bit_count: bits.len(),
            symbol_count: input.len(),
            stats,
        })
    }

    /// Decode a payload with a serialized tree, walking every payload bit.
    ///
    /// Padding bits are decoded like data; see [`Decoder::decode`].
    pub fn decode(&self, payload: &[u8], tree: &[u8]) -> Result<Vec<S>> {
        let tree = tree_codec::deserialize::<S>(tree)?;
        Ok(Decoder::new(&tree).decode(&unpack(payload)))
    }

    /// Decode exactly `symbol_count` symbols.
    pub fn decode_exact(&self, payload: &[u8], tree: &[u8], symbol_count: usize) -> Result<Vec<S>> {
        let tree = tree_codec::deserialize::<S>(tree)?;
        Decoder::new(&tree).decode_exact(&unpack(payload), symbol_count)
    }
}

impl<S: Symbol> Default for HuffmanCodec<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_decode_exact() {
        let text: Vec<char> = "she sells sea shells by the sea shore".chars().collect();
        let codec = HuffmanCodec::new();

        let encoded = codec.encode(&text).unwrap();
        assert_eq!(encoded.symbol_count, text.len());
        assert_eq!(encoded.payload.len(), encoded.bit_count.div_ceil(8));
        assert_eq!(encoded.stats.tree_bytes, encoded.tree.len());

        let decoded = codec
            .decode_exact(&encoded.payload, &encoded.tree, encoded.symbol_count)
            .unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_decode_prefix_matches_input() {
        let text: Vec<char> = "abracadabra".chars().collect();
        let codec = HuffmanCodec::new();
        let encoded = codec.encode(&text).unwrap();

        // Raw decode may add padding artifacts but never alters real data
        let decoded = codec.decode(&encoded.payload, &encoded.tree).unwrap();
        assert!(decoded.len() >= text.len());
        assert_eq!(&decoded[..text.len()], text.as_slice());
    }

    #[test]
    fn test_empty_input() {
        let err = HuffmanCodec::<u8>::new().encode(&[]).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_single_symbol_pipeline() {
        let codec = HuffmanCodec::new();
        let encoded = codec.encode(&[7u8; 12]).unwrap();

        assert!(encoded.payload.is_empty());
        assert_eq!(encoded.bit_count, 0);
        assert!(codec.decode(&encoded.payload, &encoded.tree).unwrap().is_empty());
        assert_eq!(
            codec.decode_exact(&encoded.payload, &encoded.tree, 12).unwrap(),
            vec![7u8; 12]
        );
    }

    #[test]
    fn test_encode_with_foreign_tree() {
        let trained = HuffmanTree::from_symbols(&['a', 'b', ' ']).unwrap();

        let strict = HuffmanCodec::new();
        let err = strict.encode_with_tree(&['a', '?'], &trained).unwrap_err();
        assert!(matches!(err, Error::UnmappedSymbol { position: 1, .. }));

        let lenient = HuffmanCodec::with_policy(UnmappedPolicy::Substitute(' '));
        let encoded = lenient.encode_with_tree(&['a', '?'], &trained).unwrap();
        let decoded = lenient
            .decode_exact(&encoded.payload, &encoded.tree, encoded.symbol_count)
            .unwrap();
        assert_eq!(decoded, vec!['a', ' ']);
    }

    #[test]
    fn test_malformed_tree_aborts_decode() {
        let codec = HuffmanCodec::<char>::new();
        let err = codec.decode(&[0xFF], &[0x00]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));
    }

    #[test]
    fn test_decode_exact_rejects_oversized_count() {
        let text: Vec<char> = "aba".chars().collect();
        let codec = HuffmanCodec::new();
        let encoded = codec.encode(&text).unwrap();

        let err = codec
            .decode_exact(&encoded.payload, &encoded.tree, usize::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                expected: usize::MAX,
                ..
            }
        ));
    }
}
