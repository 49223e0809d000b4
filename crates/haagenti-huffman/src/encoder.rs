//! Symbol encoding with a code table.

use crate::bits::BitSequence;
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::table::CodeTable;

/// What to do with a symbol that has no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmappedPolicy<S> {
    /// Fail with [`Error::UnmappedSymbol`].
    Strict,
    /// Emit the code of the given fallback symbol instead.
    ///
    /// Decoding then yields the fallback in place of the original symbol.
    Substitute(S),
}

// Not derived: `#[derive(Default)]` would require `S: Default`.
impl<S> Default for UnmappedPolicy<S> {
    fn default() -> Self {
        UnmappedPolicy::Strict
    }
}

/// Encodes symbol sequences into bit sequences.
#[derive(Debug, Clone)]
pub struct Encoder<'a, S: Symbol> {
    table: &'a CodeTable<S>,
    policy: UnmappedPolicy<S>,
}

impl<'a, S: Symbol> Encoder<'a, S> {
    /// Create a strict encoder.
    pub fn new(table: &'a CodeTable<S>) -> Self {
        Self {
            table,
            policy: UnmappedPolicy::Strict,
        }
    }

    /// Set the unmapped symbol policy.
    pub fn with_policy(mut self, policy: UnmappedPolicy<S>) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnmappedPolicy<S> {
        self.policy
    }

    /// Concatenate the codes of `input` in order.
    ///
    /// Symbols of a single-leaf table encode to zero bits.
    pub fn encode(&self, input: &[S]) -> Result<BitSequence> {
        let mut bits = BitSequence::with_capacity(input.len() * self.table.max_code_len().max(1));
        for (position, symbol) in input.iter().enumerate() {
            bits.extend_from(self.code_for(symbol, position)?);
        }

        tracing::debug!(
            symbols = input.len(),
            bits = bits.len(),
            "encoded symbols"
        );
        Ok(bits)
    }

    /// Number of bits [`Encoder::encode`] would produce.
    pub fn encoded_len(&self, input: &[S]) -> Result<usize> {
        input
            .iter()
            .enumerate()
            .try_fold(0usize, |total, (position, symbol)| {
                Ok(total + self.code_for(symbol, position)?.len())
            })
    }

    fn code_for(&self, symbol: &S, position: usize) -> Result<&'a BitSequence> {
        if let Some(code) = self.table.get(symbol) {
            return Ok(code);
        }

        match self.policy {
            UnmappedPolicy::Strict => Err(Error::unmapped(symbol, position)),
            UnmappedPolicy::Substitute(fallback) => {
                tracing::trace!(?symbol, ?fallback, position, "substituting unmapped symbol");
                self.table
                    .get(&fallback)
                    .ok_or_else(|| Error::unmapped(&fallback, position))
            }
        }
    }
}
