//! Huffman tree construction.
//!
//! ## Algorithm
//!
//! 1. One leaf per distinct symbol, weighted by its frequency
//! 2. All leaves go into a binary min-heap
//! 3. Pop the two lightest nodes, merge them under a new internal node
//!    whose weight is their sum, push it back
//! 4. Repeat until one node remains: the root
//!
//! ## Tie-breaking
//!
//! Nodes of equal weight pop in creation order: leaves in first-appearance
//! order of the frequency table, then merged nodes in the order they were
//! built. The first node popped becomes the left child. Other tie-break
//! rules may assign different code lengths to tied symbols, but the total
//! weighted code length is the same for every optimal construction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// Node in a Huffman tree.
///
/// Children are exclusively owned; the tree is built once and only read
/// afterwards. Trees read back from a tree file carry weight 0 everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S: Symbol> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode<S>>,
        right: Box<HuffmanNode<S>>,
    },
}

impl<S: Symbol> HuffmanNode<S> {
    /// Create a leaf.
    pub fn leaf(symbol: S, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Create an internal node weighted by the sum of its children.
    ///
    /// The sum saturates at `u64::MAX`. Trees built from a
    /// [`FrequencyTable`] never reach it.
    pub fn internal(left: HuffmanNode<S>, right: HuffmanNode<S>) -> Self {
        HuffmanNode::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Symbol held by a leaf.
    #[inline]
    pub fn symbol(&self) -> Option<S> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// `(left, right)` of an internal node.
    #[inline]
    pub fn children(&self) -> Option<(&HuffmanNode<S>, &HuffmanNode<S>)> {
        match self {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }
}

/// Heap slot ordered so that `BinaryHeap` pops the lightest, oldest node.
struct HeapEntry<S: Symbol> {
    order: u64,
    node: HuffmanNode<S>,
}

impl<S: Symbol> PartialEq for HeapEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Symbol> Eq for HeapEntry<S> {}

impl<S: Symbol> PartialOrd for HeapEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> Ord for HeapEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// An optimal prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S: Symbol> {
    root: HuffmanNode<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for a frequency table.
    pub fn build(frequencies: &FrequencyTable<S>) -> Self {
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        for (order, (symbol, weight)) in frequencies.iter().enumerate() {
            heap.push(HeapEntry {
                order: order as u64,
                node: HuffmanNode::leaf(symbol, weight),
            });
        }

        let mut next_order = frequencies.len() as u64;
        while let Some(left) = heap.pop() {
            let Some(right) = heap.pop() else {
                let tree = Self { root: left.node };
                tracing::debug!(
                    leaves = frequencies.len(),
                    depth = tree.depth(),
                    "built huffman tree"
                );
                return tree;
            };

            let merged = HuffmanNode::internal(left.node, right.node);
            tracing::trace!(weight = merged.weight(), order = next_order, "merged nodes");
            heap.push(HeapEntry {
                order: next_order,
                node: merged,
            });
            next_order += 1;
        }

        unreachable!("frequency tables always hold at least one symbol")
    }

    /// Analyze `input` and build its tree.
    pub fn from_symbols(input: &[S]) -> Result<Self> {
        let frequencies = FrequencyTable::analyze(input)?;
        Ok(Self::build(&frequencies))
    }

    /// Wrap an existing root node.
    pub fn from_root(root: HuffmanNode<S>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &HuffmanNode<S> {
        &self.root
    }

    /// True for the degenerate one-symbol tree, whose only code is empty.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Leaves as `(symbol, depth)` in preorder.
    pub fn leaves(&self) -> Vec<(S, usize)> {
        let mut leaves = Vec::new();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => leaves.push((*symbol, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|&(_, d)| d).max().unwrap_or(0)
    }

    /// Sum of weight × depth over all leaves: the encoded size in bits of
    /// the input the tree was built from. Saturates at `u64::MAX`.
    pub fn weighted_length(&self) -> u64 {
        let mut total = 0u64;
        let mut stack = vec![(&self.root, 0u64)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { weight, .. } => {
                    total = total.saturating_add(weight.saturating_mul(depth));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        total
    }

    /// Structural equality: same shape and same leaf symbols in the same
    /// positions. Weights are ignored.
    pub fn same_shape(&self, other: &Self) -> bool {
        let mut stack = vec![(&self.root, &other.root)];
        while let Some((a, b)) = stack.pop() {
            match (a, b) {
                (HuffmanNode::Leaf { symbol: x, .. }, HuffmanNode::Leaf { symbol: y, .. }) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal {
                        left: al,
                        right: ar,
                        ..
                    },
                    HuffmanNode::Internal {
                        left: bl,
                        right: br,
                        ..
                    },
                ) => {
                    stack.push((&**ar, &**br));
                    stack.push((&**al, &**bl));
                }
                _ => return false,
            }
        }
        true
    }
}
