//! Host capabilities the core consumes: randomness and fresh
//! address/hash generation.

/// Capabilities a host must provide for a policy run.
///
/// Collects the four stateful, host-provided calls a selection run needs
/// into a single record/trait-object, rather than threading four
/// separate closures through every policy function. `fee_estimator` is
/// *not* part of this trait: it is pure and stateless, so it stays a plain
/// `Fn(usize, &[Value]) -> Value` argument to [`crate::run_policy`] and
/// [`crate::select_inputs`].
pub trait Capabilities<H, A> {
    /// A uniformly random integer in `[lo, hi]` (inclusive both ends).
    ///
    /// Only consumed by the random policy and by [`crate::random_element`].
    /// Implementations backed by a seeded generator must be
    /// bit-reproducible for a fixed seed, so deterministic tests can
    /// drive selection exactly.
    fn random_int(&mut self, lo: u64, hi: u64) -> u64;

    /// A fresh, distinct change address. Must never repeat within a run.
    fn generate_change_address(&mut self) -> A;

    /// A fresh transaction hash. Called exactly once per successful
    /// [`crate::run_policy`] finalization.
    fn generate_fresh_hash(&mut self) -> H;

    /// The constant sentinel address used internally to account for
    /// sender-side fee slack. Filtered from the final transaction.
    fn treasury_address(&self) -> A;
}
