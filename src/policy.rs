//! The stateful policy runner: threads a UTxO, the inputs selected so
//! far, and the outputs generated so far through a single selection,
//! then finalizes the result into a [`Transaction`].

use alloc::vec::Vec;
use core::fmt;

use crate::capabilities::Capabilities;
use crate::collections::BTreeSet;
use crate::fee::{distribute_fee, ExpenseRegulation, FeeDistributionError};
use crate::input::Input;
use crate::output::Output;
use crate::stats::{PartialTxStats, TxStats};
use crate::transaction::Transaction;
use crate::utxo::Utxo;
use crate::value::Value;

/// The mutable working set threaded through a single policy run.
///
/// No state outlives a run: a run begins with [`InputPolicyState::new`]
/// and is consumed by [`run_policy`] once the body completes.
///
/// Invariants maintained throughout a run:
/// 1. `selected_inputs` never overlaps `utxo.domain()` — every selected
///    input has been removed from the working UTxO.
/// 2. `selected_inputs` is a subset of the initial UTxO's domain.
/// 3. Every `generated_outputs` entry is either a goal output unchanged
///    or a change output with a freshly generated address.
#[derive(Debug)]
pub struct InputPolicyState<H, A> {
    /// Remaining available UTxO.
    pub utxo: Utxo<H, A>,
    /// Inputs chosen so far.
    pub selected_inputs: BTreeSet<Input<H>>,
    /// Outputs generated so far, in generation order.
    pub generated_outputs: Vec<(ExpenseRegulation, Output<A>)>,
}

impl<H: Ord, A> InputPolicyState<H, A> {
    /// Begin a run over `utxo`, with nothing selected or generated yet.
    pub fn new(utxo: Utxo<H, A>) -> Self {
        Self {
            utxo,
            selected_inputs: BTreeSet::new(),
            generated_outputs: Vec::new(),
        }
    }

    /// Move `inputs` out of the working UTxO and into the selected set.
    pub fn select(&mut self, inputs: impl IntoIterator<Item = Input<H>>)
    where
        H: Clone,
        A: Clone,
    {
        let mut to_remove = BTreeSet::new();
        for input in inputs {
            to_remove.insert(input.clone());
            self.selected_inputs.insert(input);
        }
        self.utxo = self.utxo.remove_inputs(&to_remove);
    }

    /// Append a generated output (goal or change).
    pub fn emit(&mut self, regulation: ExpenseRegulation, output: Output<A>) {
        self.generated_outputs.push((regulation, output));
    }
}

/// Typed failures a policy run can raise. Caller dispatches on variant;
/// none of these are retried internally (the random policy's
/// ideal-then-fallback attempt is not an error retry — see
/// [`crate::policies::random`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Failure<A> {
    /// No selection of inputs could cover a goal: an exact match wasn't
    /// found (exact policy), or the UTxO was exhausted before covering
    /// the goal (largest-first / random).
    InputSelectionFailure,
    /// Fee distribution would have driven a receiver-regulated output
    /// below zero.
    InsufficientFundsToCoverFee(FeeDistributionError<A>),
    /// Selected inputs cover the goal values but not the added fee. The
    /// caller should re-invoke selection with `output` appended as an
    /// extra goal under `regulation`.
    ///
    /// `regulation` is always [`ExpenseRegulation::SENDER_PAYS_FEES`]: for
    /// goals regulated by a partial receiver share, attributing this
    /// slack entirely to the sender is an approximation inherited from
    /// the source algorithm, not a precise accounting of who actually
    /// owes it.
    NeedsExtraInputsToCover {
        /// Always [`ExpenseRegulation::SENDER_PAYS_FEES`].
        regulation: ExpenseRegulation,
        /// A virtual payment back to the treasury address for the slack
        /// amount.
        output: Output<A>,
    },
}

impl<A: fmt::Debug> fmt::Display for Failure<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::InputSelectionFailure => {
                write!(f, "no selection of inputs could cover the requested goal")
            }
            Failure::InsufficientFundsToCoverFee(err) => write!(f, "{err}"),
            Failure::NeedsExtraInputsToCover { output, .. } => write!(
                f,
                "selected inputs cover goals but not fees; need {} more",
                output.value
            ),
        }
    }
}

#[cfg(feature = "std")]
impl<A: fmt::Debug> std::error::Error for Failure<A> {}

impl<A> From<FeeDistributionError<A>> for Failure<A> {
    fn from(err: FeeDistributionError<A>) -> Self {
        Failure::InsufficientFundsToCoverFee(err)
    }
}

/// Run a policy body over `initial_utxo` and finalize its result into a
/// [`Transaction`] plus [`TxStats`].
///
/// 1. Initializes an [`InputPolicyState`] from `initial_utxo`.
/// 2. Runs `body`; a raised [`Failure`] propagates unchanged.
/// 3. Filters the treasury address out of the generated outputs (it only
///    exists to drive the covering check below).
/// 4. Distributes the fee across the filtered outputs (§ fee.rs).
/// 5. Checks that the selected inputs' balance covers the distributed
///    total; if not, raises [`Failure::NeedsExtraInputsToCover`] instead
///    of finalizing, so the caller can retry with the slack appended.
/// 6. Otherwise requests a fresh hash and returns the finalized
///    transaction.
#[allow(clippy::too_many_arguments)]
pub fn run_policy<H, A, Cap, Fee, Body>(
    fee_estimator: Fee,
    initial_utxo: Utxo<H, A>,
    caps: &mut Cap,
    body: Body,
) -> Result<(Transaction<H, A>, TxStats), Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
    Fee: Fn(usize, &[Value]) -> Value,
    Body: FnOnce(&mut InputPolicyState<H, A>, &mut Cap) -> Result<PartialTxStats, Failure<A>>,
{
    let mut state = InputPolicyState::new(initial_utxo.clone());
    let partial_stats = body(&mut state, caps)?;

    let selected = state.selected_inputs;
    let treasury = caps.treasury_address();

    // `generated_outputs` is built with `Vec::push`, so it is already in
    // forward generation order.
    let generated: Vec<(ExpenseRegulation, Output<A>)> = state
        .generated_outputs
        .into_iter()
        .filter(|(_, out)| out.address != treasury)
        .collect();

    let distributed = distribute_fee(&fee_estimator, &generated, selected.len())?;

    let amount_needed: Value = distributed.iter().map(|o| o.value).sum();
    let amount_covered = initial_utxo.restrict_to(&selected).balance();

    if amount_covered < amount_needed {
        let slack = amount_needed - amount_covered;
        return Err(Failure::NeedsExtraInputsToCover {
            regulation: ExpenseRegulation::SENDER_PAYS_FEES,
            output: Output::new(treasury, slack),
        });
    }

    let values: Vec<Value> = distributed.iter().map(|o| o.value).collect();
    let fee = fee_estimator(selected.len(), &values);
    let hash = caps.generate_fresh_hash();

    let tx = Transaction {
        version: 1,
        inputs: selected,
        outputs: distributed,
        fee,
        hash,
        extra_data: Vec::new(),
    };

    Ok((tx, TxStats::from_partial(&partial_stats)))
}
