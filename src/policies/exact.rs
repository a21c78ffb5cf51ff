//! Exact-single-match policy: one UTxO per goal with matching value.
//!
//! Trivial and not used in production — it exists for testing the policy
//! framework against a selection with no discretion at all.

use crate::capabilities::Capabilities;
use crate::fee::ExpenseRegulation;
use crate::output::Output;
use crate::policy::{Failure, InputPolicyState};
use crate::stats::{MultiSet, PartialTxStats};

/// Select, for `goal`, the first UTxO entry whose value equals it
/// exactly. Iteration order (ascending input order) is the tie-breaker
/// when several entries share the goal's value; any deterministic order
/// would do, since this policy is never used in production.
pub fn select_one<H, A>(
    state: &mut InputPolicyState<H, A>,
    regulation: ExpenseRegulation,
    goal: Output<A>,
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
{
    let matched = state
        .utxo
        .to_list()
        .into_iter()
        .find(|(_, out)| out.value == goal.value);

    match matched {
        Some((input, _out)) => {
            state.select([input]);
            state.emit(regulation, goal);
            Ok(PartialTxStats::new(1, MultiSet::singleton(0.0)))
        }
        None => Err(Failure::InputSelectionFailure),
    }
}

/// Run the exact-match policy over every goal, left-to-right.
pub fn run<H, A, Cap>(
    state: &mut InputPolicyState<H, A>,
    _caps: &mut Cap,
    goals: &[(ExpenseRegulation, Output<A>)],
) -> Result<PartialTxStats, Failure<A>>
where
    H: Ord + Clone,
    A: Clone + PartialEq,
    Cap: Capabilities<H, A>,
{
    let mut stats = PartialTxStats::default();
    for (regulation, goal) in goals {
        let partial = select_one(state, *regulation, goal.clone())?;
        stats = stats.combine(&partial);
    }
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Input;
    use crate::utxo::Utxo;
    use crate::value::Value;

    struct NoCaps;
    impl Capabilities<u32, &'static str> for NoCaps {
        fn random_int(&mut self, lo: u64, _hi: u64) -> u64 {
            lo
        }
        fn generate_change_address(&mut self) -> &'static str {
            unreachable!("exact policy never generates change")
        }
        fn generate_fresh_hash(&mut self) -> u32 {
            0
        }
        fn treasury_address(&self) -> &'static str {
            "treasury"
        }
    }

    fn utxo_of(entries: &[(u32, u32, u64)]) -> Utxo<u32, &'static str> {
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
    fn matches_first_equal_value_entry() {
        let utxo = utxo_of(&[(1, 0, 100), (1, 1, 50)]);
        let mut state = InputPolicyState::new(utxo);
        let stats = select_one(
            &mut state,
            ExpenseRegulation::SENDER_PAYS_FEES,
            Output::new("b", Value::from_sat(50)),
        )
        .unwrap();
        assert_eq!(stats.num_inputs, 1);
        assert_eq!(state.selected_inputs.len(), 1);
        assert!(state.selected_inputs.contains(&Input::new(1u32, 1)));
        assert_eq!(state.utxo.size(), 1);
    }

    #[test]
    fn no_match_fails() {
        let utxo = utxo_of(&[(1, 0, 100)]);
        let mut state = InputPolicyState::new(utxo);
        let err = select_one(
            &mut state,
            ExpenseRegulation::SENDER_PAYS_FEES,
            Output::new("b", Value::from_sat(50)),
        )
        .unwrap_err();
        assert_eq!(err, Failure::InputSelectionFailure);
    }

    #[test]
    fn multi_goal_run_processes_left_to_right() {
        let utxo = utxo_of(&[(1, 0, 100), (1, 1, 50)]);
        let mut state = InputPolicyState::new(utxo);
        let mut caps = NoCaps;
        let goals = [
            (
                ExpenseRegulation::SENDER_PAYS_FEES,
                Output::new("b", Value::from_sat(100)),
            ),
            (
                ExpenseRegulation::SENDER_PAYS_FEES,
                Output::new("c", Value::from_sat(50)),
            ),
        ];
        let stats = run(&mut state, &mut caps, &goals).unwrap();
        assert_eq!(stats.num_inputs, 2);
        assert!(state.utxo.is_empty());
    }
}
