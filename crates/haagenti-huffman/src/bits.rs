//! Bit sequences and MSB-first bit packing.
//!
//! Packing pads the logical bit sequence with zero bits up to a whole byte.
//! Padding bits are indistinguishable from zero-valued payload bits, so a
//! packed buffer alone does not recover the original bit length: callers
//! that need it must keep it alongside the bytes.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Number of zero bits [`pack`] appends to a sequence of `bit_len` bits.
#[inline]
pub fn padding_bits(bit_len: usize) -> usize {
    (8 - bit_len % 8) % 8
}

/// Pack a bit sequence into bytes, most significant bit first.
///
/// Bit `i` lands in byte `i / 8` at bit position `7 - i % 8`. The output
/// holds `ceil(len / 8)` bytes.
pub fn pack(bits: &BitSequence) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len().div_ceil(8));
    for bit in bits.iter() {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Unpack bytes into exactly `8 * bytes.len()` bits.
pub fn unpack(bytes: &[u8]) -> BitSequence {
    let mut reader = BitReader::new(bytes);
    let mut bits = BitSequence::with_capacity(bytes.len() * 8);
    while let Some(bit) = reader.read_bit() {
        bits.push(bit);
    }
    bits
}

/// An ordered, growable sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    /// Append every bit of `other`.
    #[inline]
    pub fn extend_from(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a prefix of `other` (every sequence is a prefix of itself).
    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        other.bits.starts_with(&self.bits)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Extend<bool> for BitSequence {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A character other than `0` or `1` in a textual bit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bit character {character:?} at index {index}")]
pub struct ParseBitsError {
    pub character: char,
    pub index: usize,
}

impl FromStr for BitSequence {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(index, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseBitsError { character, index }),
            })
            .collect()
    }
}

/// MSB-first bit writer.
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    bit_count: u8,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            bit_buf: 0,
            bit_count: 0,
        }
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Write the low `n` bits of `value`, highest of them first. `n <= 32`.
    #[inline]
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);
        let mask = (1u64 << n) - 1;
        self.bit_buf = (self.bit_buf << n) | (value as u64 & mask);
        self.bit_count += n;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            self.data.push((self.bit_buf >> self.bit_count) as u8);
        }
        self.bit_buf &= (1u64 << self.bit_count) - 1;
    }

    /// Total bits written so far.
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.bit_count as usize
    }

    /// Flush remaining bits (pad with zeros).
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.data.push((self.bit_buf << (8 - self.bit_count)) as u8);
        }
        self.data
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first bit reader over a byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read one bit, or `None` at the end of the data.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos / 8)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read `n` bits (`n <= 32`) as an integer, first bit most significant.
    ///
    /// Consumes nothing and returns `None` if fewer than `n` bits remain.
    pub fn read_bits(&mut self, n: u8) -> Option<u32> {
        debug_assert!(n <= 32);
        if self.bits_remaining() < n as usize {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..n {
            let bit = self.read_bit()?;
            value = (value << 1) | bit as u32;
        }
        Some(value)
    }

    /// Bits read so far.
    pub fn bits_consumed(&self) -> usize {
        self.pos
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Bytes touched so far, counting a partially read byte.
    pub fn bytes_consumed(&self) -> usize {
        self.pos.div_ceil(8)
    }
}
