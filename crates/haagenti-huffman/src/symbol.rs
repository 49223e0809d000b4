//! Alphabet units.
//!
//! A symbol only needs equality and hashing to be counted and coded. To be
//! persisted in a tree file it also declares a fixed bit width and a
//! lossless mapping to an unsigned integer of that width.

use core::fmt::Debug;
use core::hash::Hash;

/// A unit of the input alphabet.
pub trait Symbol: Copy + Eq + Hash + Debug {
    /// Width of the symbol in the serialized tree, at most 32.
    const BITS: u8;

    /// Integer form written to the tree stream.
    fn to_bits(self) -> u32;

    /// Inverse of [`Symbol::to_bits`]. `None` if `bits` is not a valid symbol.
    fn from_bits(bits: u32) -> Option<Self>;
}

/// Unicode scalar values, stored as 32-bit code points.
impl Symbol for char {
    const BITS: u8 = 32;

    #[inline]
    fn to_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_bits(bits: u32) -> Option<Self> {
        char::from_u32(bits)
    }
}

/// Raw bytes.
impl Symbol for u8 {
    const BITS: u8 = 8;

    #[inline]
    fn to_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_bits(bits: u32) -> Option<Self> {
        u8::try_from(bits).ok()
    }
}
