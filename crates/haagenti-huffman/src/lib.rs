//! # Haagenti Huffman
//!
//! Static Huffman coding: an optimal prefix code is built from the symbol
//! frequencies of a complete input, symbols are packed into a dense
//! bitstream, and the process is reversed with the same code tree.
//!
//! ## Pipeline
//!
//! | Stage | Type / function |
//! |-------|-----------------|
//! | Frequency analysis | [`FrequencyTable::analyze`] |
//! | Tree construction | [`HuffmanTree::build`] |
//! | Code derivation | [`CodeTable::from_tree`] |
//! | Encoding | [`Encoder::encode`] |
//! | Bit packing | [`bits::pack`] / [`bits::unpack`] |
//! | Tree persistence | [`tree_codec::serialize`] / [`tree_codec::deserialize`] |
//! | Decoding | [`Decoder::decode`] / [`Decoder::decode_exact`] |
//!
//! [`HuffmanCodec`] runs the whole pipeline.
//!
//! ## Example
//!
//! ```
//! use haagenti_huffman::HuffmanCodec;
//!
//! let text: Vec<char> = "abracadabra".chars().collect();
//! let codec = HuffmanCodec::new();
//!
//! let encoded = codec.encode(&text)?;
//! let decoded = codec.decode_exact(&encoded.payload, &encoded.tree, encoded.symbol_count)?;
//! assert_eq!(decoded, text);
//! # Ok::<(), haagenti_huffman::Error>(())
//! ```
//!
//! ## Padding
//!
//! Payloads carry no bit length. Packing pads with zero bits, and
//! [`Decoder::decode`] walks those bits like data, so its output may end
//! with spurious symbols. Keep [`Encoded::symbol_count`] and use
//! [`Decoder::decode_exact`] for an exact result.

pub mod bits;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod symbol;
pub mod table;
pub mod tree;
pub mod tree_codec;

pub use bits::{BitReader, BitSequence, BitWriter};
pub use codec::{Encoded, HuffmanCodec};
pub use decoder::Decoder;
pub use encoder::{Encoder, UnmappedPolicy};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use stats::CompressionStats;
pub use symbol::Symbol;
pub use table::CodeTable;
pub use tree::{HuffmanNode, HuffmanTree};
