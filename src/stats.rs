//! Transaction statistics: per-run counters and their monoidal
//! composition across a multi-goal selection.

use alloc::vec::Vec;

use crate::collections::BTreeMap;

/// A mapping from integer bin index to integer count (bin size 1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    bins: BTreeMap<u64, u64>,
}

impl Histogram {
    /// The empty histogram.
    pub fn empty() -> Self {
        Self {
            bins: BTreeMap::new(),
        }
    }

    /// A histogram with a single observation at `bin`.
    pub fn singleton(bin: u64) -> Self {
        let mut bins = BTreeMap::new();
        bins.insert(bin, 1);
        Self { bins }
    }

    /// Sum two histograms binwise.
    pub fn add(&self, other: &Self) -> Self {
        let mut bins = self.bins.clone();
        for (bin, count) in &other.bins {
            *bins.entry(*bin).or_insert(0) += count;
        }
        Self { bins }
    }

    /// The count recorded at `bin`, or zero if unobserved.
    pub fn get(&self, bin: u64) -> u64 {
        self.bins.get(&bin).copied().unwrap_or(0)
    }

    /// View the histogram as `(bin, count)` pairs, ordered by bin.
    pub fn to_vec(&self) -> Vec<(u64, u64)> {
        self.bins.iter().map(|(&b, &c)| (b, c)).collect()
    }
}

/// A counted set of non-negative floating-point ratios.
///
/// Represented internally by each ratio's IEEE-754 bit pattern, which
/// preserves the natural ordering for the finite, non-negative values
/// this crate ever inserts (change-to-goal ratios are always `>= 0.0`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiSet {
    counts: BTreeMap<u64, u64>,
}

impl MultiSet {
    /// The empty multiset.
    pub fn empty() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// A multiset containing one occurrence of `ratio`.
    pub fn singleton(ratio: f64) -> Self {
        debug_assert!(ratio.is_finite() && ratio >= 0.0, "ratio must be finite and non-negative");
        let mut counts = BTreeMap::new();
        counts.insert(ratio.to_bits(), 1);
        Self { counts }
    }

    /// Union two multisets, summing multiplicities.
    pub fn union(&self, other: &Self) -> Self {
        let mut counts = self.counts.clone();
        for (bits, count) in &other.counts {
            *counts.entry(*bits).or_insert(0) += count;
        }
        Self { counts }
    }

    /// View the multiset as `(ratio, multiplicity)` pairs, ordered by
    /// ratio.
    pub fn to_vec(&self) -> Vec<(f64, u64)> {
        self.counts
            .iter()
            .map(|(&bits, &count)| (f64::from_bits(bits), count))
            .collect()
    }
}

/// Statistics for a single goal within a transaction: its input count and
/// its change-to-goal ratio (if any), before they are folded into the
/// transaction-wide [`TxStats`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialTxStats {
    /// Number of inputs this goal selected.
    pub num_inputs: u64,
    /// Change-to-goal ratios observed (usually a singleton).
    pub ratios: MultiSet,
}

impl PartialTxStats {
    /// Construct partial stats for a single goal.
    pub fn new(num_inputs: u64, ratios: MultiSet) -> Self {
        Self { num_inputs, ratios }
    }

    /// Combine two goals' partial stats: input counts add as scalars.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            num_inputs: self.num_inputs + other.num_inputs,
            ratios: self.ratios.union(&other.ratios),
        }
    }
}

/// Aggregate statistics across one or more finalized transactions.
///
/// Unlike [`PartialTxStats`], `num_inputs` is a *histogram*: combining the
/// stats of a transaction with `n` inputs and one with `m` inputs must
/// yield a histogram with bins `{n, m}`, not a scalar `n + m`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxStats {
    /// Histogram of input counts, one observation per transaction.
    pub num_inputs: Histogram,
    /// Change-to-goal ratios observed across all transactions.
    pub ratios: MultiSet,
}

impl TxStats {
    /// Lift one transaction's partial stats into transaction-level stats.
    pub fn from_partial(partial: &PartialTxStats) -> Self {
        Self {
            num_inputs: Histogram::singleton(partial.num_inputs),
            ratios: partial.ratios.clone(),
        }
    }

    /// Combine the stats of two transactions: histograms add binwise.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            num_inputs: self.num_inputs.add(&other.num_inputs),
            ratios: self.ratios.union(&other.ratios),
        }
    }
}
