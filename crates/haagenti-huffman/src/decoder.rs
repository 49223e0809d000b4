//! Tree-walking decoder.
//!
//! The payload carries no bit length, so [`Decoder::decode`] walks every bit
//! it is given, zero padding included. Padding can therefore emit extra
//! trailing symbols (zeros descend left until a leaf is hit) or stop in the
//! middle of a code. Callers that kept the symbol count use
//! [`Decoder::decode_exact`] instead.

use crate::bits::BitSequence;
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Decodes bit sequences by walking a Huffman tree.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a, S: Symbol> {
    tree: &'a HuffmanTree<S>,
}

impl<'a, S: Symbol> Decoder<'a, S> {
    pub fn new(tree: &'a HuffmanTree<S>) -> Self {
        Self { tree }
    }

    /// Decode until `bits` is exhausted.
    ///
    /// A single-leaf tree carries no information in the bits and decodes to
    /// nothing.
    pub fn decode(&self, bits: &BitSequence) -> Vec<S> {
        if self.tree.is_single_leaf() {
            return Vec::new();
        }

        let mut output = Vec::new();
        let dangling = self.walk(bits, usize::MAX, &mut output);
        if dangling > 0 {
            tracing::debug!(dangling, "bit sequence ended inside a code");
        }
        output
    }

    /// Decode exactly `count` symbols, ignoring any bits after the last one.
    ///
    /// A single-leaf tree reproduces its symbol `count` times without
    /// reading bits; a run too large to allocate fails with [`Error::Io`]
    /// of kind `OutOfMemory`. Fails with [`Error::TruncatedPayload`] if the
    /// bits run out first.
    pub fn decode_exact(&self, bits: &BitSequence, count: usize) -> Result<Vec<S>> {
        if let HuffmanNode::Leaf { symbol, .. } = self.tree.root() {
            let mut run = Vec::new();
            run.try_reserve_exact(count)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::OutOfMemory, e))?;
            run.resize(count, *symbol);
            return Ok(run);
        }

        // Every code is at least one bit long
        let mut output = Vec::with_capacity(count.min(bits.len()));
        self.walk(bits, count, &mut output);
        if output.len() < count {
            return Err(Error::TruncatedPayload {
                expected: count,
                decoded: output.len(),
            });
        }
        Ok(output)
    }

    /// Walk `bits` from the root, pushing a symbol at every leaf, until the
    /// bits end or `limit` symbols are out. Returns the number of bits read
    /// since the last emitted symbol.
    fn walk(&self, bits: &BitSequence, limit: usize, output: &mut Vec<S>) -> usize {
        let root = self.tree.root();
        let mut node = root;
        let mut since_leaf = 0usize;

        for bit in bits.iter() {
            if output.len() >= limit {
                break;
            }

            let Some((left, right)) = node.children() else {
                break;
            };
            node = if bit { right } else { left };
            since_leaf += 1;

            if let Some(symbol) = node.symbol() {
                output.push(symbol);
                node = root;
                since_leaf = 0;
            }
        }

        since_leaf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{pack, unpack};
    use crate::encoder::Encoder;
    use crate::table::CodeTable;

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    /// a = 0, b = 10, c = 11
    fn abc_tree() -> HuffmanTree<char> {
        HuffmanTree::from_root(HuffmanNode::internal(
            HuffmanNode::leaf('a', 0),
            HuffmanNode::internal(HuffmanNode::leaf('b', 0), HuffmanNode::leaf('c', 0)),
        ))
    }

    #[test]
    fn test_decode_walks_tree() {
        let tree = abc_tree();
        let decoded = Decoder::new(&tree).decode(&bits("0101101110"));
        assert_eq!(decoded, vec!['a', 'b', 'c', 'a', 'c', 'b']);
    }

    #[test]
    fn test_whole_byte_roundtrip() {
        // a b c c: 0 10 11 11 = 7 bits, plus a = 8 bits
        let tree = abc_tree();
        let table = CodeTable::from_tree(&tree);
        let input = ['a', 'b', 'c', 'c', 'a'];

        let encoded = Encoder::new(&table).encode(&input).unwrap();
        assert_eq!(encoded.len(), 8);

        let decoded = Decoder::new(&tree).decode(&unpack(&pack(&encoded)));
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_padding_emits_spurious_symbols() {
        // b c = 1011, padded with 0000: each zero decodes to 'a'
        let tree = abc_tree();
        let padded = unpack(&pack(&bits("1011")));

        let decoded = Decoder::new(&tree).decode(&padded);
        assert_eq!(decoded, vec!['b', 'c', 'a', 'a', 'a', 'a']);

        let exact = Decoder::new(&tree).decode_exact(&padded, 2).unwrap();
        assert_eq!(exact, vec!['b', 'c']);
    }

    #[test]
    fn test_padding_can_stop_mid_code() {
        // z = 00, y = 01, x = 1
        let tree = HuffmanTree::from_root(HuffmanNode::internal(
            HuffmanNode::internal(HuffmanNode::leaf('z', 0), HuffmanNode::leaf('y', 0)),
            HuffmanNode::leaf('x', 0),
        ));
        // Seven x's and one padding zero that ends inside the left subtree
        let padded = unpack(&pack(&bits("1111111")));

        let decoded = Decoder::new(&tree).decode(&padded);
        assert_eq!(decoded, vec!['x'; 7]);
    }

    #[test]
    fn test_single_leaf_boundary() {
        let tree = HuffmanTree::from_symbols(&['q'; 5]).unwrap();
        let decoder = Decoder::new(&tree);

        assert!(decoder.decode(&BitSequence::new()).is_empty());
        assert!(decoder.decode(&bits("00000000")).is_empty());
        assert_eq!(decoder.decode_exact(&BitSequence::new(), 5).unwrap(), vec!['q'; 5]);
    }

    #[test]
    fn test_decode_exact_truncated() {
        let tree = abc_tree();
        let err = Decoder::new(&tree).decode_exact(&bits("0101"), 4).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                expected: 4,
                decoded: 2
            }
        ));
    }

    #[test]
    fn test_decode_exact_oversized_count() {
        let tree = abc_tree();
        let err = Decoder::new(&tree)
            .decode_exact(&bits("0101"), usize::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                expected: usize::MAX,
                decoded: 2
            }
        ));
    }

    #[test]
    fn test_single_leaf_oversized_run() {
        let tree = HuffmanTree::from_symbols(&['q'; 3]).unwrap();
        let err = Decoder::new(&tree)
            .decode_exact(&BitSequence::new(), usize::MAX)
            .unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::OutOfMemory),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
