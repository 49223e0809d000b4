//! Tree serialization.
//!
//! ## Format
//!
//! Preorder walk of the tree, packed MSB-first:
//!
//! ```text
//! node     := internal | leaf
//! internal := 0 node(left) node(right)
//! leaf     := 1 symbol          (S::BITS bits, most significant first)
//! ```
//!
//! The stream is zero-padded to a whole byte. No frequencies or lengths are
//! stored: the tag sequence alone tells the reader where each subtree ends.

use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Serialize a tree to its compact byte form.
pub fn serialize<S: Symbol>(tree: &HuffmanTree<S>) -> Vec<u8> {
    let mut writer = BitWriter::new();
    let mut stack = vec![tree.root()];

    while let Some(node) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                writer.write_bit(true);
                writer.write_bits(symbol.to_bits(), S::BITS);
            }
            HuffmanNode::Internal { left, right, .. } => {
                writer.write_bit(false);
                stack.push(&**right);
                stack.push(&**left);
            }
        }
    }

    tracing::debug!(bits = writer.bits_written(), "serialized huffman tree");
    writer.finish()
}

/// Rebuild a tree from [`serialize`] output.
///
/// Every node of the result has weight 0. Fails with
/// [`Error::MalformedTree`] if the stream ends early, holds an invalid
/// symbol value, or has whole bytes left after the tree.
pub fn deserialize<S: Symbol>(data: &[u8]) -> Result<HuffmanTree<S>> {
    let mut reader = BitReader::new(data);
    // Internal nodes still waiting for a child; `Some` once the left
    // subtree is complete.
    let mut pending: Vec<Option<HuffmanNode<S>>> = Vec::new();

    loop {
        let offset = reader.bits_consumed();
        let is_leaf = reader
            .read_bit()
            .ok_or_else(|| Error::malformed("stream ended before node tag", offset))?;

        if !is_leaf {
            pending.push(None);
            continue;
        }

        let offset = reader.bits_consumed();
        let value = reader
            .read_bits(S::BITS)
            .ok_or_else(|| Error::malformed("stream ended inside leaf symbol", offset))?;
        let symbol = S::from_bits(value).ok_or_else(|| {
            Error::malformed(format!("invalid symbol value {value:#x}"), offset)
        })?;

        let mut node = HuffmanNode::leaf(symbol, 0);
        loop {
            match pending.pop() {
                None => return finish(&reader, data.len(), node),
                Some(None) => {
                    pending.push(Some(node));
                    break;
                }
                Some(Some(left)) => node = HuffmanNode::internal(left, node),
            }
        }
    }
}

fn finish<S: Symbol>(
    reader: &BitReader<'_>,
    len: usize,
    root: HuffmanNode<S>,
) -> Result<HuffmanTree<S>> {
    let used = reader.bytes_consumed();
    if used < len {
        return Err(Error::malformed(
            format!("{} trailing bytes after tree", len - used),
            reader.bits_consumed(),
        ));
    }

    let tree = HuffmanTree::from_root(root);
    tracing::debug!(
        leaves = tree.leaf_count(),
        bytes = len,
        "deserialized huffman tree"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_tree() -> HuffmanTree<u8> {
        HuffmanTree::from_root(HuffmanNode::internal(
            HuffmanNode::leaf(b'A', 1),
            HuffmanNode::leaf(b'B', 1),
        ))
    }

    /// Left-leaning chain: every internal node has a leaf on its right.
    fn chain(len: u32) -> HuffmanTree<char> {
        let mut node = HuffmanNode::leaf('a', 1);
        for i in 1..len {
            let symbol = char::from_u32('a' as u32 + i).unwrap();
            node = HuffmanNode::internal(node, HuffmanNode::leaf(symbol, 1));
        }
        HuffmanTree::from_root(node)
    }

    #[test]
    fn test_serialize_layout() {
        // 0 | 1 01000001 | 1 01000010 | 00000 padding
        let bytes = serialize(&ab_tree());
        assert_eq!(bytes, vec![0x50, 0x68, 0x40]);
    }

    #[test]
    fn test_roundtrip_two_leaves() {
        let tree = ab_tree();
        let decoded: HuffmanTree<u8> = deserialize(&serialize(&tree)).unwrap();

        assert!(decoded.same_shape(&tree));
        assert_eq!(decoded.root().weight(), 0);
    }

    #[test]
    fn test_roundtrip_single_leaf() {
        let tree = HuffmanTree::from_symbols(&['λ'; 4]).unwrap();
        let bytes = serialize(&tree);
        // 1 tag bit + 32 symbol bits
        assert_eq!(bytes.len(), 5);

        let decoded: HuffmanTree<char> = deserialize(&bytes).unwrap();
        assert!(decoded.is_single_leaf());
        assert_eq!(decoded.root().symbol(), Some('λ'));
    }

    #[test]
    fn test_roundtrip_deep_chain() {
        let tree = chain(500);
        let decoded: HuffmanTree<char> = deserialize(&serialize(&tree)).unwrap();

        assert_eq!(decoded.depth(), 499);
        assert!(decoded.same_shape(&tree));
    }

    #[test]
    fn test_roundtrip_built_tree() {
        let text: Vec<char> = "the quick brown fox jumps over the lazy dog".chars().collect();
        let tree = HuffmanTree::from_symbols(&text).unwrap();
        let decoded: HuffmanTree<char> = deserialize(&serialize(&tree)).unwrap();

        assert!(decoded.same_shape(&tree));
        assert_eq!(decoded.leaves().len(), tree.leaves().len());
    }

    #[test]
    fn test_empty_stream() {
        let err = deserialize::<u8>(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { bit_offset: 0, .. }));
    }

    #[test]
    fn test_truncated_symbol() {
        let err = deserialize::<u8>(&[0x50, 0x68]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { bit_offset: 11, .. }));
    }

    #[test]
    fn test_missing_subtree() {
        // Eight internal tags and nothing else
        let err = deserialize::<u8>(&[0x00]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { bit_offset: 8, .. }));
    }

    #[test]
    fn test_trailing_bytes() {
        let err = deserialize::<u8>(&[0x50, 0x68, 0x40, 0x00]).unwrap_err();
        match err {
            Error::MalformedTree { message, bit_offset } => {
                assert_eq!(message, "1 trailing bytes after tree");
                assert_eq!(bit_offset, 19);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_char() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_bits(0xD800, 32);
        let err = deserialize::<char>(&writer.finish()).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { bit_offset: 1, .. }));
    }
}
