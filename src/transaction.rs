//! The finalized, unsigned transaction a successful policy run produces.

use alloc::vec::Vec;

use crate::collections::BTreeSet;
use crate::input::Input;
use crate::output::Output;
use crate::value::Value;

/// An opaque blob of host-defined metadata attached to a [`Transaction`].
/// The core never inspects these; it only carries them through.
pub type ExtraDatum = Vec<u8>;

/// A finalized, unsigned transaction: the inputs selected, the
/// fee-adjusted outputs, the fee itself, and a freshly generated hash.
///
/// Signing, serialization to wire format, and broadcast are all the
/// host's responsibility; this crate never inspects `hash` or
/// `extra_data` beyond carrying them through.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction<H, A> {
    /// Opaque freshness counter; a host-defined nonce/version field with
    /// no meaning to the core itself.
    pub version: u32,
    /// The inputs selected to cover `outputs` plus `fee`.
    pub inputs: BTreeSet<Input<H>>,
    /// The fee-adjusted, treasury-filtered output list.
    pub outputs: Vec<Output<A>>,
    /// The fee actually charged, as reported by the fee estimator.
    pub fee: Value,
    /// A freshly generated transaction hash.
    pub hash: H,
    /// Host-defined metadata, carried through unchanged.
    pub extra_data: Vec<ExtraDatum>,
}
