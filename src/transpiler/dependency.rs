//! Gate dependency graph.
//!
//! Each gate maps to the set of gates it immediately depends on, i.e. the
//! earlier gates it shares a qubit with, after eliding edges that are already
//! implied through a recorded predecessor.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, trace};

use crate::error::ResizeResult;
use crate::ir::{Circuit, GateLabel};

/// Minimal causal-precedence graph over the gates of a two-qubit circuit.
///
/// Only gates with at least one recorded predecessor appear as keys. A gate
/// that is not a key is treated as unreachable by [`DependencyGraph::reaches`].
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    labels: Vec<GateLabel>,
    index: HashMap<GateLabel, usize>,
    edges: BTreeMap<usize, BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Builds the dependency graph of `circuit`.
    ///
    /// Every gate must carry exactly two qubit operands.
    pub fn build(circuit: &Circuit) -> ResizeResult<Self> {
        let gates = circuit.gates();
        let mut graph = Self {
            labels: Vec::with_capacity(gates.len()),
            index: HashMap::with_capacity(gates.len()),
            edges: BTreeMap::new(),
        };

        for (pos, gate) in gates.iter().enumerate() {
            gate.two_qubits()?;
            graph.index.insert(gate.label.clone(), pos);
            graph.labels.push(gate.label.clone());
        }

        for (pos, gate) in gates.iter().enumerate() {
            for (prev_pos, prev) in gates[..pos].iter().enumerate() {
                if !prev.shares_qubit(gate) {
                    continue;
                }
                // Predecessors already reachable through `prev` are redundant.
                let implied: Vec<usize> = match (graph.edges.get(&pos), graph.edges.get(&prev_pos)) {
                    (Some(current), Some(via_prev)) => {
                        current.intersection(via_prev).copied().collect()
                    }
                    _ => Vec::new(),
                };
                let preds = graph.edges.entry(pos).or_default();
                for stale in implied {
                    trace!(
                        "Eliding {} -> {} (implied via {})",
                        gates[stale].label,
                        gate.label,
                        prev.label
                    );
                    preds.remove(&stale);
                }
                preds.insert(prev_pos);
            }
        }

        debug!(
            "Built dependency graph: {} gates, {} dependent, {} edges",
            graph.labels.len(),
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Number of gates with at least one dependency.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no gate has a dependency.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Whether `label` has recorded dependencies.
    pub fn contains(&self, label: &GateLabel) -> bool {
        self.index_of(label)
            .is_some_and(|pos| self.edges.contains_key(&pos))
    }

    /// Immediate dependencies of `label`, in circuit order.
    ///
    /// Returns `None` when the gate has no recorded dependency.
    pub fn dependencies(&self, label: &GateLabel) -> Option<Vec<&GateLabel>> {
        let pos = self.index_of(label)?;
        self.edges
            .get(&pos)
            .map(|preds| preds.iter().map(|&p| &self.labels[p]).collect())
    }

    /// Whether `to` is reachable from `from` by following dependency edges.
    ///
    /// Labels that are not keys of the graph are unreachable from and to
    /// anything; this is not an error.
    pub fn reaches(&self, from: &GateLabel, to: &GateLabel) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.reaches_index(from, to),
            _ => false,
        }
    }

    /// Exports the graph to petgraph, with an edge from each dependency to
    /// the gate depending on it. Every gate becomes a node.
    pub fn to_digraph(&self) -> DiGraph<GateLabel, ()> {
        let mut graph = DiGraph::with_capacity(self.labels.len(), self.edge_count());
        for label in &self.labels {
            graph.add_node(label.clone());
        }
        for (&pos, preds) in &self.edges {
            for &p in preds {
                graph.add_edge(NodeIndex::new(p), NodeIndex::new(pos), ());
            }
        }
        graph
    }

    /// Whether the graph is free of cycles.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.to_digraph())
    }

    pub(crate) fn index_of(&self, label: &GateLabel) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Explicit-stack depth-first search over gate positions.
    pub(crate) fn reaches_index(&self, from: usize, to: usize) -> bool {
        if !self.edges.contains_key(&from) || !self.edges.contains_key(&to) {
            return false;
        }
        let mut visited = vec![false; self.labels.len()];
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            let Some(preds) = self.edges.get(&node) else {
                continue;
            };
            for &pred in preds {
                if pred == to {
                    return true;
                }
                if !visited[pred] {
                    visited[pred] = true;
                    stack.push(pred);
                }
            }
        }
        false
    }
}

/// Memoizing reachability oracle over a [`DependencyGraph`].
///
/// Candidate checks query many overlapping gate pairs; answers are cached per
/// `(from, to)` position pair.
#[derive(Debug)]
pub struct Reachability<'a> {
    graph: &'a DependencyGraph,
    cache: HashMap<(usize, usize), bool>,
}

impl<'a> Reachability<'a> {
    /// Creates an empty cache over `graph`.
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            cache: HashMap::new(),
        }
    }

    /// Cached [`DependencyGraph::reaches`] on labels.
    pub fn reaches(&mut self, from: &GateLabel, to: &GateLabel) -> bool {
        match (self.graph.index_of(from), self.graph.index_of(to)) {
            (Some(from), Some(to)) => self.reaches_index(from, to),
            _ => false,
        }
    }

    pub(crate) fn reaches_index(&mut self, from: usize, to: usize) -> bool {
        let graph = self.graph;
        *self
            .cache
            .entry((from, to))
            .or_insert_with(|| graph.reaches_index(from, to))
    }

    /// Number of cached answers.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
