//! Reuse candidate discovery.
//!
//! A pair of qubits is a reuse candidate when no gate acts on both of them and
//! no gate of one is both reachable from and able to reach a gate of the other
//! in the dependency graph.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

use super::dependency::{DependencyGraph, Reachability};
use super::interaction::InteractionGraph;
use crate::ir::Circuit;

/// An unordered pair of qubits that may share a physical register.
///
/// Always stored with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReuseCandidate {
    /// Smaller qubit index.
    pub low: usize,
    /// Larger qubit index.
    pub high: usize,
}

impl ReuseCandidate {
    /// Creates a candidate from two distinct qubits in any order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

impl fmt::Display for ReuseCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Lists every pair of qubits in `[0, n)` that never appear in the same gate.
///
/// Idle qubits have no neighbours, so they pair with every other qubit.
pub fn non_interacting_pairs(interactions: &InteractionGraph) -> Vec<ReuseCandidate> {
    let n = interactions.num_qubits();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if !interactions.interacts(i, j) {
                pairs.push(ReuseCandidate::new(i, j));
            }
        }
    }
    pairs
}

/// Gate positions touching `low`, and those touching `high` but not `low`.
fn gate_sets(circuit: &Circuit, candidate: ReuseCandidate) -> (Vec<usize>, Vec<usize>) {
    let mut low_gates = Vec::new();
    let mut high_gates = Vec::new();
    for (pos, gate) in circuit.gates().iter().enumerate() {
        if gate.acts_on(candidate.low) {
            low_gates.push(pos);
        } else if gate.acts_on(candidate.high) {
            high_gates.push(pos);
        }
    }
    (low_gates, high_gates)
}

/// Whether some gate of one qubit and some gate of the other reach each other.
fn has_mutual_dependency(
    reach: &mut Reachability<'_>,
    low_gates: &[usize],
    high_gates: &[usize],
) -> bool {
    low_gates.iter().any(|&g1| {
        high_gates
            .iter()
            .any(|&g2| reach.reaches_index(g1, g2) && reach.reaches_index(g2, g1))
    })
}

/// Finds the reuse candidates of a filtered two-qubit circuit.
///
/// `dependencies` and `interactions` must have been built from `circuit`.
pub fn find_reuse_candidates(
    circuit: &Circuit,
    dependencies: &DependencyGraph,
    interactions: &InteractionGraph,
) -> Vec<ReuseCandidate> {
    let mut candidates = non_interacting_pairs(interactions);
    debug!("{} non-interacting qubit pairs", candidates.len());

    let mut reach = Reachability::new(dependencies);
    let rejected: HashSet<ReuseCandidate> = candidates
        .iter()
        .copied()
        .filter(|&candidate| {
            let (low_gates, high_gates) = gate_sets(circuit, candidate);
            let cyclic = has_mutual_dependency(&mut reach, &low_gates, &high_gates);
            if cyclic {
                trace!("Rejecting {}: mutual dependency", candidate);
            }
            cyclic
        })
        .collect();
    candidates.retain(|c| !rejected.contains(c));

    debug!(
        "{} reuse candidates ({} rejected, {} reachability queries cached)",
        candidates.len(),
        rejected.len(),
        reach.cached()
    );
    candidates
}
