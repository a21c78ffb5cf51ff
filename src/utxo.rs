//! The UTxO container: a finite mapping from [`Input`] to [`Output`].

use alloc::vec::Vec;

use crate::collections::{BTreeMap, BTreeSet};
use crate::input::Input;
use crate::output::Output;
use crate::value::Value;

/// A finite mapping from [`Input`] handles to the [`Output`]s they
/// reference.
///
/// All operations are total and side-effect-free: none of them can fail,
/// and none of them observe anything outside their arguments.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utxo<H, A> {
    entries: BTreeMap<Input<H>, Output<A>>,
}

impl<H: Ord, A> Utxo<H, A> {
    /// The empty UTxO.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert (or replace) the output referenced by `input`.
    pub fn insert(&mut self, input: Input<H>, output: Output<A>) {
        self.entries.insert(input, output);
    }

    /// Remove the entry for `input`, if present.
    pub fn delete(&mut self, input: &Input<H>) {
        self.entries.remove(input);
    }

    /// Keep only entries whose input is in `inputs`.
    pub fn restrict_to(&self, inputs: &BTreeSet<Input<H>>) -> Self
    where
        H: Clone,
        A: Clone,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(i, _)| inputs.contains(i))
                .map(|(i, o)| (i.clone(), o.clone()))
                .collect(),
        }
    }

    /// Drop every entry whose input is in `inputs`.
    pub fn remove_inputs(&self, inputs: &BTreeSet<Input<H>>) -> Self
    where
        H: Clone,
        A: Clone,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(i, _)| !inputs.contains(i))
                .map(|(i, o)| (i.clone(), o.clone()))
                .collect(),
        }
    }

    /// Merge two UTxOs; entries in `other` win on a colliding input.
    pub fn union(&self, other: &Self) -> Self
    where
        H: Clone,
        A: Clone,
    {
        let mut entries = self.entries.clone();
        for (i, o) in &other.entries {
            entries.insert(i.clone(), o.clone());
        }
        Self { entries }
    }

    /// The set of inputs this UTxO covers.
    pub fn domain(&self) -> BTreeSet<Input<H>>
    where
        H: Clone,
    {
        self.entries.keys().cloned().collect()
    }

    /// The sum of every output's value.
    pub fn balance(&self) -> Value {
        self.entries.values().map(|o| o.value).sum()
    }

    /// The number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the output for a given input.
    pub fn get(&self, input: &Input<H>) -> Option<&Output<A>> {
        self.entries.get(input)
    }

    /// View every entry as a `(Input, Output)` pair, ordered by input.
    pub fn to_list(&self) -> Vec<(Input<H>, Output<A>)>
    where
        H: Clone,
        A: Clone,
    {
        self.entries
            .iter()
            .map(|(i, o)| (i.clone(), o.clone()))
            .collect()
    }

    /// View the entries as a `BTreeMap`.
    pub fn to_map(&self) -> BTreeMap<Input<H>, Output<A>>
    where
        H: Clone,
        A: Clone,
    {
        self.entries.clone()
    }

    /// Build a UTxO from a `BTreeMap` of entries.
    pub fn from_map(map: BTreeMap<Input<H>, Output<A>>) -> Self {
        Self { entries: map }
    }
}

impl<H: Ord, A> FromIterator<(Input<H>, Output<A>)> for Utxo<H, A> {
    fn from_iter<I: IntoIterator<Item = (Input<H>, Output<A>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn utxo(entries: &[(u32, u32, u64)]) -> Utxo<u32, &'static str> {
        entries
            .iter()
            .map(|&(hash, idx, value)| {
                (
                    Input::new(hash, idx),
                    Output::new("addr", Value::from_sat(value)),
                )
            })
            .collect()
    }

    #[test]
    fn balance_sums_every_output() {
        let u = utxo(&[(1, 0, 100), (1, 1, 50), (2, 0, 25)]);
        assert_eq!(u.balance(), Value::from_sat(175));
        assert_eq!(u.size(), 3);
    }

    #[test]
    fn restrict_to_keeps_only_named_inputs() {
        let u = utxo(&[(1, 0, 100), (1, 1, 50), (2, 0, 25)]);
        let keep: BTreeSet<_> = [Input::new(1u32, 0)].into_iter().collect();
        let restricted = u.restrict_to(&keep);
        assert_eq!(restricted.size(), 1);
        assert_eq!(restricted.balance(), Value::from_sat(100));
    }

    #[test]
    fn remove_inputs_drops_named_inputs() {
        let u = utxo(&[(1, 0, 100), (1, 1, 50), (2, 0, 25)]);
        let drop: BTreeSet<_> = [Input::new(1u32, 0)].into_iter().collect();
        let remaining = u.remove_inputs(&drop);
        assert_eq!(remaining.size(), 2);
        assert_eq!(remaining.balance(), Value::from_sat(75));
    }

    #[test]
    fn union_prefers_the_right_hand_side() {
        let mut a = Utxo::empty();
        a.insert(Input::new(1u32, 0), Output::new("a", Value::from_sat(1)));
        let mut b = Utxo::empty();
        b.insert(Input::new(1u32, 0), Output::new("b", Value::from_sat(2)));
        let merged = a.union(&b);
        assert_eq!(merged.size(), 1);
        assert_eq!(merged.get(&Input::new(1u32, 0)).unwrap().address, "b");
    }

    #[test]
    fn domain_delete_and_empty_round_trip() {
        let mut u = Utxo::empty();
        assert!(u.is_empty());
        u.insert(Input::new(1u32, 0), Output::new("a", Value::from_sat(1)));
        assert_eq!(u.domain().len(), 1);
        u.delete(&Input::new(1u32, 0));
        assert!(u.is_empty());
    }
}
