//! Qubit reuse analysis for quantum circuits.
//!
//! Given an ordered list of two-qubit gates, the analysis finds which logical
//! qubits can share one physical register over time, much like register
//! allocation in a classical compiler.
//!
//! # Pipeline
//!
//! ```text
//! Circuit
//!   │ SingleQubitFilter
//!   ├── DependencyGraph      (minimal causal predecessors per gate)
//!   └── InteractionGraph     (qubits that ever share a gate) + LastUse
//!         │
//!         ▼
//!   find_reuse_candidates    (non-interacting, no mutual dependency)
//!         │
//!   orient_pairs             (earlier last use donates its register)
//!         │
//!   ReuseSelector            (all maximum matchings)
//!         ▼
//!   ReuseReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use q_resize::ir::Circuit;
//! use q_resize::transpiler::QubitReuseAnalysis;
//!
//! let mut circuit = Circuit::new(4);
//! circuit.cx(0, 1).unwrap();
//! circuit.cx(2, 3).unwrap();
//!
//! let report = QubitReuseAnalysis::default().run(&circuit).unwrap();
//! assert_eq!(report.minimum_qubits, 2);
//! ```

pub mod config;
pub mod error;
pub mod ir;
pub mod parser;
pub mod transpiler;

pub use config::ResizeConfig;
pub use error::{ResizeError, ResizeResult};
