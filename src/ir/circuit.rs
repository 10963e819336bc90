use super::gates::GateType;
use super::operations::{Gate, GateLabel};
use crate::error::{ResizeError, ResizeResult};
use serde::Serialize;
use std::collections::HashSet;

/// Intermediate Representation of a Quantum Circuit.
///
/// A `Circuit` is an ordered sequence of labelled gates over a fixed number of
/// qubits. Gate order is execution order; nothing else encodes time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Circuit {
    /// Total number of qubits in the circuit.
    pub num_qubits: usize,
    gates: Vec<Gate>,
    #[serde(skip)]
    labels: HashSet<GateLabel>,
}

impl Circuit {
    /// Creates a new empty circuit.
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - The number of qubits to allocate.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            labels: HashSet::new(),
        }
    }

    /// Adds a gate to the end of the circuit.
    ///
    /// Rejects duplicate labels, out-of-range qubits and gates whose operand
    /// list is empty or repeats a qubit.
    pub fn add_gate(&mut self, gate: Gate) -> ResizeResult<()> {
        if self.labels.contains(&gate.label) {
            return Err(ResizeError::DuplicateLabel(gate.label));
        }
        if gate.qubits.is_empty() {
            return Err(ResizeError::DuplicateQubit {
                qubit: None,
                label: gate.label,
            });
        }
        for (i, &q) in gate.qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(ResizeError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
            if gate.qubits[..i].contains(&q) {
                return Err(ResizeError::DuplicateQubit {
                    qubit: Some(q),
                    label: gate.label,
                });
            }
        }
        self.labels.insert(gate.label.clone());
        self.gates.push(gate);
        Ok(())
    }

    /// Appends a gate labelled `g{k}`, `k` being its position in the circuit.
    pub fn append(&mut self, name: GateType, qubits: Vec<usize>) -> ResizeResult<GateLabel> {
        let label = GateLabel::new(format!("g{}", self.gates.len()));
        self.add_gate(Gate::new(name, qubits, label.clone()))?;
        Ok(label)
    }

    /// Appends a CX gate on `control` and `target`.
    pub fn cx(&mut self, control: usize, target: usize) -> ResizeResult<GateLabel> {
        self.append(GateType::CX, vec![control, target])
    }

    /// The gates in execution order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns a copy of the circuit with every single-qubit gate removed.
    ///
    /// Surviving gates keep their labels and relative order.
    pub fn without_single_qubit_gates(&self) -> Self {
        let gates: Vec<Gate> = self
            .gates
            .iter()
            .filter(|g| g.num_qubits() != 1)
            .cloned()
            .collect();
        let labels = gates.iter().map(|g| g.label.clone()).collect();
        Self {
            num_qubits: self.num_qubits,
            gates,
            labels,
        }
    }
}
