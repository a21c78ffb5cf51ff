//! Randomness helpers shared by the random policy: uniform element
//! draw from a UTxO, and the ideal/fallback range search.

use core::fmt;

use rand_core::RngCore;

use crate::capabilities::Capabilities;
use crate::collections::BTreeSet;
use crate::input::Input;
use crate::output::Output;
use crate::utxo::Utxo;
use crate::value::Value;

/// Draw a uniformly random integer in `[lo, hi]` from an `RngCore`, via
/// the same modulo-based index draw `shuffle_slice` uses internally.
///
/// A convenience for implementing [`Capabilities::random_int`] on top of
/// any `rand_core`-compatible generator, rather than a requirement of the
/// trait itself — hosts that already have their own source of randomness
/// are free to ignore this and implement `random_int` directly.
pub fn uniform_int(rng: &mut impl RngCore, lo: u64, hi: u64) -> u64 {
    let span = hi - lo + 1;
    lo + rng.next_u64() % span
}

/// Pop a uniformly random entry out of `utxo`, mutating it in place.
///
/// Returns `None` if `utxo` is empty. Runs in O(n): the container is
/// reified into an indexable sequence for each draw, which the spec
/// explicitly allows when the underlying container lacks positional
/// access — correctness (uniformity), not speed, is the contract.
pub fn random_element<H, A>(
    utxo: &mut Utxo<H, A>,
    caps: &mut impl Capabilities<H, A>,
) -> Option<(Input<H>, Output<A>)>
where
    H: Ord + Clone,
    A: Clone,
{
    if utxo.is_empty() {
        return None;
    }
    let entries = utxo.to_list();
    let index = caps.random_int(0, (entries.len() - 1) as u64) as usize;
    let (input, output) = entries[index].clone();
    utxo.delete(&input);
    Some((input, output))
}

/// The working UTxO was exhausted before `random_in_range` could reach
/// its target range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InRangeError;

impl fmt::Display for InRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utxo exhausted before reaching the target range")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InRangeError {}

/// Draw inputs from `utxo` at random until their total value falls in
/// `[lo, hi]`, mutating `utxo` in place to remove exactly the inputs
/// returned. Returns the selected inputs together with their total value.
///
/// Maintains three partitions while searching: the running sum `acc`,
/// inputs drawn but rejected as too large (`discarded`), and inputs
/// accepted into the result (`used`). On success, `discarded` is restored
/// into `utxo` and `used`'s keys are returned. On failure, both
/// `discarded` and `used` are restored into `utxo` — a failed search
/// leaves the working UTxO exactly as it found it, so a caller can retry
/// with a different range against the same UTxO. Terminates after at
/// most `utxo.size()` draws, since every draw removes one entry from the
/// working set.
pub fn random_in_range<H, A>(
    utxo: &mut Utxo<H, A>,
    lo: Value,
    hi: Value,
    caps: &mut impl Capabilities<H, A>,
) -> Result<(BTreeSet<Input<H>>, Value), InRangeError>
where
    H: Ord + Clone,
    A: Clone,
{
    let mut acc = Value::ZERO;
    let mut discarded: Utxo<H, A> = Utxo::empty();
    let mut used: Utxo<H, A> = Utxo::empty();

    loop {
        if lo <= acc && acc <= hi {
            *utxo = utxo.union(&discarded);
            return Ok((used.domain(), acc));
        }
        if utxo.is_empty() {
            *utxo = utxo.union(&discarded).union(&used);
            return Err(InRangeError);
        }
        let (input, output) =
            random_element(utxo, caps).expect("utxo non-empty was just checked");
        match acc.checked_add(output.value) {
            Some(acc_prime) if acc_prime <= hi => {
                acc = acc_prime;
                used.insert(input, output);
            }
            _ => {
                discarded.insert(input, output);
            }
        }
    }
}
