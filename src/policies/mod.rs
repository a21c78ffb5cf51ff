//! Concrete selection policies, each processing a goal list left-to-right
//! over a shared [`crate::InputPolicyState`].
//!
//! Every policy exposes a `run` function with the same shape:
//! `fn(&mut InputPolicyState<H, A>, &mut Cap, &[(ExpenseRegulation,
//! Output<A>)]) -> Result<PartialTxStats, Failure<A>>`, so
//! [`crate::select_inputs`] can dispatch on [`crate::Policy`] uniformly.

pub mod exact;
pub mod largest_first;
pub mod random;
