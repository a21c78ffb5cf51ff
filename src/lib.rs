//! `coin_select_core`
//!
//! Coin (input) selection core for a UTxO-model wallet: given a set of
//! unspent outputs and a list of payment goals, choose a subset of inputs
//! and assemble an unsigned [`Transaction`], generating change outputs and
//! distributing the fee burden between sender and receivers as it goes.
//!
//! Signing, serialization, broadcast, persistent storage, address
//! derivation, key management and fee estimation itself are all out of
//! scope: the crate is parameterized over those concerns via
//! [`Capabilities`] and a pure fee-estimator closure.

#![warn(missing_docs)]
#![no_std]

extern crate alloc;

#[macro_use]
#[cfg(feature = "std")]
extern crate std;

mod capabilities;
mod fee;
mod input;
mod output;
mod policy;
pub mod policies;
mod rng;
mod select;
mod stats;
mod transaction;
mod utxo;
mod value;

pub use capabilities::Capabilities;
pub use fee::{distribute_fee, ExpenseRegulation, FeeDistributionError};
pub use input::Input;
pub use output::Output;
pub use policy::{run_policy, Failure, InputPolicyState};
pub use rng::{random_element, random_in_range, uniform_int, InRangeError};
pub use select::{select_inputs, Policy, PrivacyMode};
pub use stats::{Histogram, MultiSet, PartialTxStats, TxStats};
pub use transaction::Transaction;
pub use utxo::Utxo;
pub use value::Value;

pub(crate) mod collections {
    #![allow(unused)]

    #[cfg(feature = "std")]
    pub use std::collections::*;

    #[cfg(not(feature = "std"))]
    pub type HashMap<K, V> = alloc::collections::BTreeMap<K, V>;
    pub use alloc::collections::*;
}
