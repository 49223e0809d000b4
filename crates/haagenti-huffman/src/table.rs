//! Code tables derived from Huffman trees.

use indexmap::IndexMap;

use crate::bits::BitSequence;
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Mapping from symbol to its bit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: IndexMap<S, BitSequence>,
}

impl<S: Symbol> CodeTable<S> {
    /// Derive codes from root-to-leaf paths: `0` for left, `1` for right.
    ///
    /// Leaves are visited in preorder. A single-leaf tree maps its symbol
    /// to the empty code.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = IndexMap::new();
        let mut stack = vec![(tree.root(), BitSequence::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);

                    stack.push((&**right, right_path));
                    stack.push((&**left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSequence> {
        self.codes.get(symbol)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` in tree preorder.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitSequence)> {
        self.codes.iter()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitSequence::len).max().unwrap_or(0)
    }

    /// Σ count × code length over `frequencies`, or `None` if some counted
    /// symbol has no code or the sum overflows.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |total, (symbol, count)| {
            let code = self.codes.get(&symbol)?;
            total.checked_add(count.checked_mul(code.len() as u64)?)
        })
    }

    /// True if no code is a prefix of another.
    ///
    /// After sorting, a code that prefixes any other code also prefixes
    /// its immediate successor, so adjacent pairs suffice.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&[bool]> = self.codes.values().map(BitSequence::as_slice).collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}
