use super::gates::GateType;
use crate::error::{ResizeError, ResizeResult};
use serde::Serialize;
use std::fmt;

/// Unique identity of a gate within a circuit.
///
/// Labels may be arbitrary strings or integers; integers are stored in their
/// decimal rendering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GateLabel(String);

impl GateLabel {
    /// Creates a label from any string-like value.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GateLabel {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for GateLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<usize> for GateLabel {
    fn from(label: usize) -> Self {
        Self(label.to_string())
    }
}

/// A single gate application in the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gate {
    /// Operation name (informational).
    pub name: GateType,
    /// Indices of the qubits involved, in operand order.
    pub qubits: Vec<usize>,
    /// Unique label of this gate.
    pub label: GateLabel,
}

impl Gate {
    /// Creates a new gate.
    pub fn new(name: GateType, qubits: Vec<usize>, label: impl Into<GateLabel>) -> Self {
        Self {
            name,
            qubits,
            label: label.into(),
        }
    }

    /// Number of qubit operands.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the gate acts on `qubit`.
    pub fn acts_on(&self, qubit: usize) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Whether the two gates have at least one qubit operand in common.
    pub fn shares_qubit(&self, other: &Gate) -> bool {
        self.qubits.iter().any(|q| other.acts_on(*q))
    }

    /// The two operands of a two-qubit gate.
    ///
    /// Fails with [`ResizeError::MalformedGate`] for any other arity.
    pub fn two_qubits(&self) -> ResizeResult<(usize, usize)> {
        match self.qubits.as_slice() {
            [a, b] => Ok((*a, *b)),
            other => Err(ResizeError::MalformedGate {
                label: self.label.clone(),
                got: other.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_qubit() {
        let a = Gate::new(GateType::CX, vec![0, 2], "g0");
        let b = Gate::new(GateType::CX, vec![2, 4], "g1");
        let c = Gate::new(GateType::CX, vec![1, 3], "g2");
        assert!(a.shares_qubit(&b));
        assert!(!a.shares_qubit(&c));
    }

    #[test]
    fn test_two_qubits_rejects_single_qubit_gate() {
        let gate = Gate::new(GateType::X, vec![4], "g1");
        assert_eq!(
            gate.two_qubits(),
            Err(ResizeError::MalformedGate {
                label: GateLabel::from("g1"),
                got: 1,
            })
        );
    }

    #[test]
    fn test_integer_labels() {
        let gate = Gate::new(GateType::CZ, vec![0, 1], 7usize);
        assert_eq!(gate.label.as_str(), "7");
    }
}
