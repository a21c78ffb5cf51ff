//! Fee distribution: amend each goal's output value by its share of the
//! estimated fee, per that goal's [`ExpenseRegulation`].

use alloc::vec::Vec;
use core::fmt;

use crate::output::Output;
use crate::value::Value;

/// How a goal's share of the fee is apportioned between sender and
/// receiver.
///
/// Represented as an exact rational (`numerator / denominator`) rather
/// than a raw float, so [`ExpenseRegulation::ceil_share`] can compute a
/// ceiling division without floating-point drift at the boundary (see the
/// design notes on `ceil(epsilon * ratio)`). [`ExpenseRegulation::ratio`]
/// still exposes the `[0.0, 1.0]` ratio the spec documents, for
/// observability and tests.
///
/// - `0.0`: the sender pays the whole epsilon share; the goal's output
///   value *grows* by epsilon (it is covered from the input side).
/// - `(0.0, 1.0]`: the receiver absorbs that fraction of epsilon; the
///   goal's output value shrinks.
///
/// Ratios outside `[0.0, 1.0]` are not supported and are rejected at
/// construction time with a panic — this is a programmer error, not a
/// recoverable [`crate::Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpenseRegulation {
    numerator: u64,
    denominator: u64,
}

impl ExpenseRegulation {
    /// The sender pays the entire epsilon share for this goal.
    pub const SENDER_PAYS_FEES: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// The receiver absorbs the entire epsilon share for this goal.
    pub const RECEIVER_PAYS_FEES: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// The receiver absorbs `numerator / denominator` of the epsilon
    /// share; the remainder is implicitly covered by the sender.
    ///
    /// Panics if `denominator` is zero or the ratio exceeds `1.0`.
    pub fn receiver_share(numerator: u64, denominator: u64) -> Self {
        assert!(denominator > 0, "expense regulation denominator must be positive");
        assert!(
            numerator <= denominator,
            "expense regulation ratio must be within [0.0, 1.0]"
        );
        Self {
            numerator,
            denominator,
        }
    }

    /// The regulation ratio as a float in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    fn is_sender_pays(&self) -> bool {
        self.numerator == 0
    }

    /// `ceil(epsilon * numerator / denominator)`, computed over the exact
    /// rational to avoid float rounding error at the boundary.
    fn ceil_share(&self, epsilon: Value) -> Value {
        let product = epsilon.to_sat() as u128 * self.numerator as u128;
        let denom = self.denominator as u128;
        let d = (product + denom - 1) / denom;
        Value::from_sat(d as u64)
    }
}

/// Fee distribution would drive a receiver-regulated output below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeDistributionError<A> {
    /// The regulation governing the failing goal.
    pub regulation: ExpenseRegulation,
    /// The goal output whose value could not absorb its fee share.
    pub output: Output<A>,
}

impl<A: fmt::Debug> fmt::Display for FeeDistributionError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient funds to cover fee for output {:?} under regulation ratio {}",
            self.output,
            self.regulation.ratio()
        )
    }
}

#[cfg(feature = "std")]
impl<A: fmt::Debug> std::error::Error for FeeDistributionError<A> {}

/// Amend each `(regulation, output)` goal's value by its share of the
/// estimated fee.
///
/// `epsilon`, the per-goal share of the fee, is `upper_bound_fee` when
/// `goals` is empty, otherwise `upper_bound_fee / goals.len()` using
/// integer division — any remainder from that division is absorbed by
/// the ceiling in [`ExpenseRegulation::ceil_share`], which guarantees the
/// accumulated fee reaches (or exceeds) `upper_bound_fee`, keeping the
/// solvency check in [`crate::run_policy`] conservative.
///
/// Outputs whose value lands exactly on zero after distribution are
/// dropped from the result: a zero-value output contributes nothing and
/// would only confuse the solvency check in [`crate::run_policy`], which
/// expects every surviving output to carry a genuine payment.
pub fn distribute_fee<A: Clone>(
    fee_estimator: &dyn Fn(usize, &[Value]) -> Value,
    goals: &[(ExpenseRegulation, Output<A>)],
    expected_inputs_len: usize,
) -> Result<Vec<Output<A>>, FeeDistributionError<A>> {
    let values: Vec<Value> = goals.iter().map(|(_, out)| out.value).collect();
    let upper_bound_fee = fee_estimator(expected_inputs_len, &values);

    let epsilon = if goals.is_empty() {
        upper_bound_fee
    } else {
        Value::from_sat(upper_bound_fee.to_sat() / goals.len() as u64)
    };

    let mut amended = Vec::with_capacity(goals.len());
    for (regulation, out) in goals {
        let new_value = if regulation.is_sender_pays() {
            out.value + epsilon
        } else {
            let share = regulation.ceil_share(epsilon);
            if out.value < share {
                return Err(FeeDistributionError {
                    regulation: *regulation,
                    output: out.clone(),
                });
            }
            out.value - share
        };
        amended.push(out.with_value(new_value));
    }

    Ok(amended.into_iter().filter(|o| o.value != Value::ZERO).collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn estimator(_inputs: usize, _outputs: &[Value]) -> Value {
        Value::from_sat(40)
    }

    #[test]
    fn receiver_pays_half_with_ceiling() {
        // E4: two goals, ratio 0.5, values 100 and 300, fee estimator
        // returns 40 regardless of inputs -> epsilon = 20, ceil(20*0.5) = 10.
        let reg = ExpenseRegulation::receiver_share(1, 2);
        let goals = alloc::vec![
            (reg, Output::new("b", Value::from_sat(100))),
            (reg, Output::new("c", Value::from_sat(300))),
        ];
        let result = distribute_fee(&estimator, &goals, 1).unwrap();
        assert_eq!(result[0].value, Value::from_sat(90));
        assert_eq!(result[1].value, Value::from_sat(290));
    }

    #[test]
    fn sender_pays_grows_the_output() {
        fn est(_i: usize, _o: &[Value]) -> Value {
            Value::from_sat(10)
        }
        let goals = alloc::vec![(
            ExpenseRegulation::SENDER_PAYS_FEES,
            Output::new("b", Value::from_sat(100)),
        )];
        let result = distribute_fee(&est, &goals, 1).unwrap();
        assert_eq!(result[0].value, Value::from_sat(110));
    }

    #[test]
    fn receiver_share_below_fee_fails() {
        let reg = ExpenseRegulation::receiver_share(1, 1);
        let goals = alloc::vec![(reg, Output::new("b", Value::from_sat(5)))];
        let err = distribute_fee(&estimator, &goals, 1).unwrap_err();
        assert_eq!(err.regulation, reg);
    }

    #[test]
    fn empty_goal_list_uses_whole_fee_as_epsilon() {
        let result = distribute_fee::<&str>(&estimator, &[], 1).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    #[should_panic]
    fn ratio_above_one_panics() {
        ExpenseRegulation::receiver_share(3, 2);
    }

    #[test]
    fn exact_zero_after_distribution_is_dropped() {
        fn est(_i: usize, _o: &[Value]) -> Value {
            Value::from_sat(10)
        }
        let goals = alloc::vec![(
            ExpenseRegulation::RECEIVER_PAYS_FEES,
            Output::new("b", Value::from_sat(10)),
        )];
        let result = distribute_fee(&est, &goals, 1).unwrap();
        assert!(result.is_empty());
    }
}
