//! Random policy: randomized selection with a privacy mode that shapes
//! change-output sizing.
//!
//! Self-correction properties this implementation preserves: if `k`% of
//! the UTxO's entries are "small", random draws pick small entries
//! roughly `k`% of the time, naturally matching payment scale; and in
//! `PrivacyMode::On`, change outputs land between 0.5x and 2x the
//! payment, refilling the UTxO near recent payment scales and making
//! change hard to distinguish from ordinary payments.

use crate::capabilities::Capabilities;
use crate::fee::ExpenseRegulation;
use crate::output::Output;
use crate::policy::{Failure, InputPolicyState};
use crate::rng::random_in_range;
use crate::select::PrivacyMode;
use crate::stats::{MultiSet, PartialTxStats};
use crate::value::Value;

/// Select inputs for `goal` at random, honoring `privacy_mode`'s change
/// shaping preference.
pub fn select_one<H, A, Cap>(
    state: &mut InputPolicyState<H, A>,
    caps: &mut Cap,
    regulation: ExpenseRegulation,
    goal: Output<A>,
    privacy_mode: PrivacyMode,
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
{
    let v = goal.value;
    let half = Value::from_sat(v.to_sat() / 2);
    let ideal = (v + half, v + v + v);
    let fallback = (v, Value::from_sat(u64::MAX));

    let (used, sum) = match privacy_mode {
        PrivacyMode::On => match random_in_range(&mut state.utxo, ideal.0, ideal.1, caps) {
            Ok(result) => result,
            Err(_) => random_in_range(&mut state.utxo, fallback.0, fallback.1, caps)
                .map_err(|_| Failure::InputSelectionFailure)?,
        },
        PrivacyMode::Off => random_in_range(&mut state.utxo, fallback.0, fallback.1, caps)
            .map_err(|_| Failure::InputSelectionFailure)?,
    };

    let num_inputs = used.len() as u64;
    state.select(used);
    state.emit(regulation, goal.clone());

    if sum > v {
        let change_value = sum - v;
        let change_address = caps.generate_change_address();
        state.emit(regulation, Output::new(change_address, change_value));
    }

    let ratio = (sum.to_sat() - v.to_sat()) as f64 / v.to_sat() as f64;
    Ok(PartialTxStats::new(num_inputs, MultiSet::singleton(ratio)))
}

/// Run the random policy over every goal, left-to-right.
pub fn run<H, A, Cap>(
    state: &mut InputPolicyState<H, A>,
    caps: &mut Cap,
    goals: &[(ExpenseRegulation, Output<A>)],
    privacy_mode: PrivacyMode,
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
{
    let mut stats = PartialTxStats::default();
    for (regulation, goal) in goals {
        let partial = select_one(state, caps, *regulation, goal.clone(), privacy_mode)?;
        stats = stats.combine(&partial);
    }
    Ok(stats)
}
