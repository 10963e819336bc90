//! Error types for circuit construction and reuse analysis.

use crate::ir::GateLabel;
use thiserror::Error;

/// Errors that can occur while building a circuit or analysing qubit reuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResizeError {
    /// A gate reached the graph builders without exactly two qubit operands.
    #[error("Gate '{label}' must act on exactly 2 qubits, got {got}")]
    MalformedGate {
        /// Label of the offending gate.
        label: GateLabel,
        /// Number of operands the gate carries.
        got: usize,
    },

    /// Two gates share the same label.
    #[error("Duplicate gate label '{0}'")]
    DuplicateLabel(GateLabel),

    /// A gate lists the same qubit more than once, or no qubit at all.
    #[error("Gate '{label}' has invalid operands{}", format_qubit_context(.qubit))]
    DuplicateQubit {
        /// The repeated qubit, if any.
        qubit: Option<usize>,
        /// Label of the offending gate.
        label: GateLabel,
    },

    /// A qubit index lies outside the circuit's register.
    #[error("Qubit index {qubit} out of range for a circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending index.
        qubit: usize,
        /// Width of the circuit.
        num_qubits: usize,
    },

    /// A QASM statement refers to a register that was never declared.
    #[error("Undefined quantum register: {0}")]
    UndefinedRegister(String),

    /// The QASM source could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The analysis configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[allow(clippy::ref_option)]
fn format_qubit_context(qubit: &Option<usize>) -> String {
    match qubit {
        Some(q) => format!(" (qubit {q} repeated)"),
        None => " (no qubits)".to_string(),
    }
}

/// Result type for reuse analysis operations.
pub type ResizeResult<T> = Result<T, ResizeError>;
