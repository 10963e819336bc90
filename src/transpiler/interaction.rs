//! Qubit interaction graph and last-use map.

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{ResizeError, ResizeResult};
use crate::ir::{Circuit, GateLabel};

/// Undirected graph of qubits that are jointly operated on by some gate.
///
/// Nodes are qubit indices `0..num_qubits`. Edge weights count how many gates
/// act on the pair.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    graph: UnGraph<(), u32>,
}

impl InteractionGraph {
    /// Width of the graph (the circuit's qubit count).
    pub fn num_qubits(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct interacting pairs.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether no qubit pair interacts.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Whether `a` and `b` appear together in some gate.
    pub fn interacts(&self, a: usize, b: usize) -> bool {
        self.interaction_count(a, b) > 0
    }

    /// How many gates act on both `a` and `b`.
    pub fn interaction_count(&self, a: usize, b: usize) -> u32 {
        if a >= self.num_qubits() || b >= self.num_qubits() {
            return 0;
        }
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map_or(0, |e| self.graph[e])
    }

    /// Sorted qubits that `qubit` interacts with.
    pub fn neighbors(&self, qubit: usize) -> Vec<usize> {
        if qubit >= self.num_qubits() {
            return Vec::new();
        }
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(qubit))
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }
}

/// The last gate, in circuit order, acting on each qubit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LastUse {
    by_qubit: BTreeMap<usize, (usize, GateLabel)>,
}

impl LastUse {
    /// Label of the last gate on `qubit`.
    pub fn last_gate(&self, qubit: usize) -> Option<&GateLabel> {
        self.by_qubit.get(&qubit).map(|(_, label)| label)
    }

    /// Circuit position of the last gate on `qubit`.
    pub fn position(&self, qubit: usize) -> Option<usize> {
        self.by_qubit.get(&qubit).map(|(pos, _)| *pos)
    }

    /// Number of qubits with a recorded last use.
    pub fn len(&self) -> usize {
        self.by_qubit.len()
    }

    /// Whether no qubit has been used.
    pub fn is_empty(&self) -> bool {
        self.by_qubit.is_empty()
    }

    fn record(&mut self, qubit: usize, position: usize, label: &GateLabel) {
        self.by_qubit.insert(qubit, (position, label.clone()));
    }
}

/// Builds the interaction graph and last-use map in a single pass.
///
/// Every gate must carry exactly two qubit operands.
pub fn build_interaction_graph(circuit: &Circuit) -> ResizeResult<(InteractionGraph, LastUse)> {
    let mut graph = UnGraph::with_capacity(circuit.num_qubits, circuit.len());
    for _ in 0..circuit.num_qubits {
        graph.add_node(());
    }
    let mut last_use = LastUse::default();

    for (pos, gate) in circuit.gates().iter().enumerate() {
        let (a, b) = gate.two_qubits()?;
        for q in [a, b] {
            if q >= circuit.num_qubits {
                return Err(ResizeError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: circuit.num_qubits,
                });
            }
        }
        let (na, nb) = (NodeIndex::new(a), NodeIndex::new(b));
        match graph.find_edge(na, nb) {
            Some(edge) => graph[edge] += 1,
            None => {
                graph.add_edge(na, nb, 1);
            }
        }
        last_use.record(a, pos, &gate.label);
        last_use.record(b, pos, &gate.label);
    }

    debug!(
        "Built interaction graph: {} qubits, {} interacting pairs",
        graph.node_count(),
        graph.edge_count()
    );
    Ok((InteractionGraph { graph }, last_use))
}
