//! Largest-first policy: deterministic greedy selection.
//!
//! Not tie-broken on equal values — whichever order the working UTxO's
//! iteration yields for equal-value entries (ascending input order, since
//! it is backed by a `BTreeMap`) decides among them. Any total order on
//! inputs is acceptable here; this crate documents its choice rather than
//! picking an arbitrary one silently.

use alloc::vec::Vec;

use crate::capabilities::Capabilities;
use crate::fee::ExpenseRegulation;
use crate::output::Output;
use crate::policy::{Failure, InputPolicyState};
use crate::stats::{MultiSet, PartialTxStats};
use crate::value::Value;

/// Select inputs for `goal` by taking the largest remaining UTxO entries
/// first until their sum meets or exceeds the goal value, emitting a
/// change output for any excess.
pub fn select_one<H, A, Cap>(
    state: &mut InputPolicyState<H, A>,
    caps: &mut Cap,
    regulation: ExpenseRegulation,
    goal: Output<A>,
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
{
    let mut entries = state.utxo.to_list();
    entries.sort_by(|a, b| b.1.value.cmp(&a.1.value));

    let mut picked = Vec::new();
    let mut sum = Value::ZERO;
    for (input, out) in entries {
        picked.push(input);
        sum = sum + out.value;
        if sum >= goal.value {
            break;
        }
    }

    if sum < goal.value {
        return Err(Failure::InputSelectionFailure);
    }

    let num_inputs = picked.len() as u64;
    state.select(picked);
    state.emit(regulation, goal.clone());

    if sum > goal.value {
        let change_value = sum - goal.value;
        let change_address = caps.generate_change_address();
        state.emit(regulation, Output::new(change_address, change_value));
    }

    let ratio = (sum.to_sat() - goal.value.to_sat()) as f64 / goal.value.to_sat() as f64;
    Ok(PartialTxStats::new(num_inputs, MultiSet::singleton(ratio)))
}

/// Run the largest-first policy over every goal, left-to-right.
pub fn run<H, A, Cap>(
    state: &mut InputPolicyState<H, A>,
    caps: &mut Cap,
    goals: &[(ExpenseRegulation, Output<A>)],
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
{
    let mut stats = PartialTxStats::default();
    for (regulation, goal) in goals {
        let partial = select_one(state, caps, *regulation, goal.clone())?;
        stats = stats.combine(&partial);
    }
    Ok(stats)
}
