use crate::error::ResizeResult;
use crate::ir::Circuit;
use tracing::debug;

/// A trait for transpiler passes.
///
/// A pass takes a circuit and returns a transformed circuit.
pub trait Pass {
    /// Returns the name of the pass.
    fn name(&self) -> &str;

    /// Runs the pass on the given circuit.
    fn run(&self, circuit: &Circuit) -> ResizeResult<Circuit>;
}

/// Manages a sequence of transpiler passes.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Creates a new empty PassManager.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Adds a pass to the manager.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Number of registered passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether no pass is registered.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs all passes in sequence on the given circuit.
    pub fn run(&self, circuit: &Circuit) -> ResizeResult<Circuit> {
        let mut current_circuit = circuit.clone();
        for pass in &self.passes {
            debug!("Running pass: {}", pass.name());
            current_circuit = pass.run(&current_circuit)?;
            debug!("Pass {} completed, gates: {}", pass.name(), current_circuit.len());
        }
        Ok(current_circuit)
    }
}

/// Removes every single-qubit gate from the circuit.
///
/// Single-qubit gates never create interactions between qubits, so the reuse
/// analysis only looks at what remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleQubitFilter;

impl Pass for SingleQubitFilter {
    fn name(&self) -> &str {
        "SingleQubitFilter"
    }

    fn run(&self, circuit: &Circuit) -> ResizeResult<Circuit> {
        Ok(circuit.without_single_qubit_gates())
    }
}
