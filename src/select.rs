//! The top-level entry point: pick a concrete policy and run it.

use crate::capabilities::Capabilities;
use crate::fee::ExpenseRegulation;
use crate::output::Output;
use crate::policy::{run_policy, Failure};
use crate::policies;
use crate::stats::TxStats;
use crate::transaction::Transaction;
use crate::utxo::Utxo;
use crate::value::Value;

/// How the random policy sizes its change output.
///
/// `On` keeps change between 0.5x and 2x the payment it follows, so a
/// change output is hard to tell apart from an ordinary payment of
/// similar scale. `Off` skips that search and accepts whatever change
/// the fallback range produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyMode {
    /// Prefer change sized like a recent payment.
    On,
    /// No preference on change size.
    Off,
}

/// A selectable coin-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// One UTxO entry per goal, matched by exact value. Testing only.
    ExactSingleMatch,
    /// Deterministic greedy selection, largest entries first.
    LargestFirst,
    /// Randomized selection with the given privacy preference.
    Random(PrivacyMode),
}

/// Select inputs for `goals` against `utxo` under `policy`, distribute
/// `fee_estimator`'s fee across them, and finalize a [`Transaction`].
///
/// This is the single public entry point: it dispatches to the chosen
/// policy's `run` and hands the result to [`run_policy`] for fee
/// distribution and finalization.
pub fn select_inputs<H, A, Cap, Fee>(
    policy: Policy,
    fee_estimator: Fee,
    utxo: Utxo<H, A>,
    goals: &[(ExpenseRegulation, Output<A>)],
    caps: &mut Cap,
) -> Result<(Transaction<H, A>, TxStats), Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
    Fee: Fn(usize, &[Value]) -> Value,
{
    run_policy(fee_estimator, utxo, caps, |state, caps| match policy {
        Policy::ExactSingleMatch => policies::exact::run(state, caps, goals),
        Policy::LargestFirst => policies::largest_first::run(state, caps, goals),
        Policy::Random(mode) => policies::random::run(state, caps, goals, mode),
    })
}
