//! Transaction outputs: value-typed and immutable once constructed.

use crate::value::Value;

/// A record of `(address, value)`.
///
/// Outputs are value-typed and immutable once constructed: every mutation
/// in this crate (fee distribution, change sizing) produces a new
/// `Output` rather than editing one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output<A> {
    /// Destination address.
    pub address: A,
    /// Amount paid to `address`.
    pub value: Value,
}

impl<A> Output<A> {
    /// Construct an output.
    pub fn new(address: A, value: Value) -> Self {
        Self { address, value }
    }

    /// Return a new output with the same address and `value` replaced.
    pub fn with_value(&self, value: Value) -> Self
    where
        A: Clone,
    {
        Self {
            address: self.address.clone(),
            value,
        }
    }
}
