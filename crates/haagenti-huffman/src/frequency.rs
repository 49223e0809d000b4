//! Symbol frequency analysis.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Occurrence counts per distinct symbol.
///
/// Entries keep first-appearance order, so building a tree from the same
/// input always yields the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    counts: IndexMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count every symbol in `input`.
    ///
    /// Returns [`Error::EmptyInput`] if `input` has no symbols.
    pub fn analyze(input: &[S]) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts: IndexMap<S, u64> = IndexMap::new();
        for &symbol in input {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        tracing::debug!(
            symbols = input.len(),
            distinct = counts.len(),
            "analyzed symbol frequencies"
        );

        Ok(Self { counts })
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate. Zero counts are rejected so that every
    /// leaf in a built tree has a positive weight. The grand total must fit
    /// in a `u64`; every internal node weight is bounded by it, so building
    /// a tree from the table cannot overflow.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut counts: IndexMap<S, u64> = IndexMap::new();
        let mut total = 0u64;
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(invalid(&symbol, "zero count"));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| invalid(&symbol, "total count overflows u64"))?;

            // Bounded by `total`, so this cannot overflow
            *counts.entry(symbol).or_insert(0) += count;
        }

        if counts.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self { counts })
    }

    /// Count for `symbol`, if it occurred.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols. Never zero.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

fn invalid<S: Symbol>(symbol: &S, reason: &'static str) -> Error {
    Error::InvalidFrequency {
        symbol: format!("{symbol:?}"),
        reason,
    }
}
