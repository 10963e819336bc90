//! Donor/recipient orientation of reuse candidates.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

use super::candidates::ReuseCandidate;
use super::interaction::LastUse;

/// A reuse candidate with a fixed direction: the donor's register is freed
/// after its last gate and handed to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReusePair {
    /// Qubit whose register is released.
    pub donor: usize,
    /// Qubit that takes the released register over.
    pub recipient: usize,
}

impl ReusePair {
    /// Creates a pair.
    pub fn new(donor: usize, recipient: usize) -> Self {
        Self { donor, recipient }
    }
}

impl fmt::Display for ReusePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Qubit {} can be reused by qubit {}",
            self.donor, self.recipient
        )
    }
}

/// Orients each candidate so that the qubit whose last gate comes first in
/// circuit order is the donor.
///
/// A qubit with no recorded last use never holds state, so it donates. If
/// both are idle, or both share the same last gate, the candidate keeps its
/// `low -> high` direction.
pub fn orient_pairs(candidates: &[ReuseCandidate], last_use: &LastUse) -> Vec<ReusePair> {
    candidates
        .iter()
        .map(|candidate| {
            let order = match (
                last_use.position(candidate.low),
                last_use.position(candidate.high),
            ) {
                (Some(low), Some(high)) => low.cmp(&high),
                (Some(_), None) => Ordering::Greater,
                (None, _) => Ordering::Less,
            };
            if order == Ordering::Greater {
                trace!(
                    "Qubit {} is freed before qubit {}",
                    candidate.high,
                    candidate.low
                );
                ReusePair::new(candidate.high, candidate.low)
            } else {
                ReusePair::new(candidate.low, candidate.high)
            }
        })
        .collect()
}
