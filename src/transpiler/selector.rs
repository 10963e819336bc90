//! Selection of conflict-free reuse plans.
//!
//! Oriented reuse pairs are edges of a graph over qubits. A plan may use each
//! qubit at most once, so the best plans are exactly the maximum matchings of
//! that graph. The matching size comes from Edmonds' blossom algorithm; all
//! matchings of that size are then enumerated by ordered backtracking.

use petgraph::algo::maximum_matching;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

use super::orient::ReusePair;

/// A set of qubit-disjoint reuse pairs, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReusePlan {
    pairs: Vec<ReusePair>,
}

impl ReusePlan {
    /// Builds a plan from pairs in any order.
    pub fn new(mut pairs: Vec<ReusePair>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();
        Self { pairs }
    }

    /// The pairs, in canonical order.
    pub fn pairs(&self) -> &[ReusePair] {
        &self.pairs
    }

    /// Number of registers saved by this plan.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the plan saves nothing.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every qubit the plan touches.
    pub fn qubits(&self) -> BTreeSet<usize> {
        self.pairs
            .iter()
            .flat_map(|p| [p.donor, p.recipient])
            .collect()
    }

    /// Whether no qubit appears in two pairs.
    pub fn is_disjoint(&self) -> bool {
        self.qubits().len() == 2 * self.pairs.len()
    }
}

impl fmt::Display for ReusePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.pairs {
            writeln!(f, "{pair}")?;
        }
        Ok(())
    }
}

/// Outcome of [`ReuseSelector::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Size of a maximum plan.
    pub matching_size: usize,
    /// Every maximum plan found, in canonical order.
    pub plans: Vec<ReusePlan>,
    /// Whether enumeration stopped at the plan limit.
    pub truncated: bool,
}

/// Picks the largest qubit-disjoint subsets of oriented reuse pairs.
#[derive(Debug, Clone, Copy)]
pub struct ReuseSelector {
    plan_limit: usize,
}

impl ReuseSelector {
    /// Creates a selector reporting at most `plan_limit` plans (minimum 1).
    pub fn new(plan_limit: usize) -> Self {
        Self {
            plan_limit: plan_limit.max(1),
        }
    }

    /// Selects every maximum plan over `pairs` for a circuit of `num_qubits`.
    ///
    /// With no usable pair the only plan is the empty one.
    pub fn select(&self, pairs: &[ReusePair], num_qubits: usize) -> Selection {
        let edges: Vec<ReusePair> = pairs
            .iter()
            .copied()
            .filter(|p| p.donor != p.recipient)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let width = edges
            .iter()
            .map(|p| p.donor.max(p.recipient) + 1)
            .max()
            .unwrap_or(0)
            .max(num_qubits);

        let mut graph = UnGraph::<(), ()>::with_capacity(width, edges.len());
        for _ in 0..width {
            graph.add_node(());
        }
        for pair in &edges {
            graph.add_edge(NodeIndex::new(pair.donor), NodeIndex::new(pair.recipient), ());
        }
        let matching_size = maximum_matching(&graph).edges().count();
        debug!(
            "Maximum matching over {} reuse pairs has size {}",
            edges.len(),
            matching_size
        );

        let mut search = PlanSearch {
            edges: &edges,
            target: matching_size,
            limit: self.plan_limit,
            used: vec![false; width],
            chosen: Vec::with_capacity(matching_size),
            plans: BTreeSet::new(),
            truncated: false,
        };
        search.extend(0);
        if search.truncated {
            warn!(
                "Stopped after {} reuse plans of size {}",
                self.plan_limit, matching_size
            );
        }

        Selection {
            matching_size,
            plans: search.plans.into_iter().collect(),
            truncated: search.truncated,
        }
    }
}

impl Default for ReuseSelector {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PLAN_LIMIT)
    }
}

/// Backtracking over edge subsets in index order, so each matching is
/// visited once.
struct PlanSearch<'a> {
    edges: &'a [ReusePair],
    target: usize,
    limit: usize,
    used: Vec<bool>,
    chosen: Vec<ReusePair>,
    plans: BTreeSet<ReusePlan>,
    truncated: bool,
}

impl PlanSearch<'_> {
    fn extend(&mut self, start: usize) {
        if self.chosen.len() == self.target {
            if self.plans.len() >= self.limit {
                self.truncated = true;
            } else {
                self.plans.insert(ReusePlan::new(self.chosen.clone()));
            }
            return;
        }
        let needed = self.target - self.chosen.len();
        for idx in start..self.edges.len() {
            if self.edges.len() - idx < needed || self.truncated {
                return;
            }
            let pair = self.edges[idx];
            if self.used[pair.donor] || self.used[pair.recipient] {
                continue;
            }
            self.used[pair.donor] = true;
            self.used[pair.recipient] = true;
            self.chosen.push(pair);
            self.extend(idx + 1);
            self.chosen.pop();
            self.used[pair.donor] = false;
            self.used[pair.recipient] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(d: usize, r: usize) -> ReusePair {
        ReusePair::new(d, r)
    }

    #[test]
    fn test_no_pairs_yields_empty_plan() {
        let selection = ReuseSelector::default().select(&[], 4);
        assert_eq!(selection.matching_size, 0);
        assert_eq!(selection.plans, vec![ReusePlan::default()]);
        assert!(!selection.truncated);
    }

    #[test]
    fn test_reports_all_maximum_plans() {
        // Path 0-1-2-3: {0-1, 2-3} is the only perfect matching, but a greedy
        // scan starting from 1-2 would stop at one pair.
        let pairs = [pair(1, 2), pair(0, 1), pair(2, 3)];
        let selection = ReuseSelector::default().select(&pairs, 4);
        assert_eq!(selection.matching_size, 2);
        assert_eq!(
            selection.plans,
            vec![ReusePlan::new(vec![pair(0, 1), pair(2, 3)])]
        );
    }

    #[test]
    fn test_ties_are_all_reported() {
        // A 4-cycle has two perfect matchings.
        let pairs = [pair(0, 1), pair(4, 3), pair(0, 3), pair(4, 1)];
        let selection = ReuseSelector::default().select(&pairs, 5);
        assert_eq!(selection.matching_size, 2);
        assert_eq!(
            selection.plans,
            vec![
                ReusePlan::new(vec![pair(0, 1), pair(4, 3)]),
                ReusePlan::new(vec![pair(0, 3), pair(4, 1)]),
            ]
        );
        assert!(selection.plans.iter().all(ReusePlan::is_disjoint));
    }

    #[test]
    fn test_odd_cycle_needs_exact_matching() {
        // Triangle 0-1-2 plus pendant 2-3: only 0-1 leaves 2-3 free.
        let pairs = [pair(1, 2), pair(0, 2), pair(0, 1), pair(2, 3)];
        let selection = ReuseSelector::default().select(&pairs, 4);
        assert_eq!(selection.matching_size, 2);
        assert_eq!(
            selection.plans,
            vec![ReusePlan::new(vec![pair(0, 1), pair(2, 3)])]
        );
    }

    #[test]
    fn test_plan_limit_truncates() {
        let pairs = [pair(0, 1), pair(4, 3), pair(0, 3), pair(4, 1)];
        let selection = ReuseSelector::new(1).select(&pairs, 5);
        assert_eq!(selection.plans.len(), 1);
        assert!(selection.truncated);
    }

    #[test]
    fn test_plan_is_canonical() {
        let plan = ReusePlan::new(vec![pair(4, 3), pair(0, 1)]);
        assert_eq!(plan.pairs(), &[pair(0, 1), pair(4, 3)]);
        assert_eq!(
            plan.to_string(),
            "Qubit 0 can be reused by qubit 1\nQubit 4 can be reused by qubit 3\n"
        );
        assert_eq!(plan.qubits().into_iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    }
}
