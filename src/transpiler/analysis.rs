//! End-to-end qubit reuse analysis.

use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

use super::candidates::{find_reuse_candidates, ReuseCandidate};
use super::dependency::DependencyGraph;
use super::interaction::{build_interaction_graph, InteractionGraph, LastUse};
use super::orient::{orient_pairs, ReusePair};
use super::pass::{PassManager, SingleQubitFilter};
use super::selector::{ReusePlan, ReuseSelector};
use crate::config::ResizeConfig;
use crate::error::{ResizeError, ResizeResult};
use crate::ir::Circuit;

/// The minimum physical qubit count and every plan that reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReuseReport {
    /// Qubit count of the input circuit.
    pub original_qubits: usize,
    /// Qubit count after applying any one of the plans.
    pub minimum_qubits: usize,
    /// All maximum plans, in canonical order.
    pub plans: Vec<ReusePlan>,
    /// Whether more plans exist than were reported.
    pub truncated: bool,
}

impl ReuseReport {
    /// Number of registers saved.
    pub fn reduction(&self) -> usize {
        self.original_qubits - self.minimum_qubits
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> ResizeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ResizeError::Serialization(e.to_string()))
    }
}

impl fmt::Display for ReuseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The following resizing opportunities are present in the given circuit:"
        )?;
        for plan in &self.plans {
            writeln!(f, "---------------------------")?;
            write!(f, "{plan}")?;
            writeln!(
                f,
                "The number of qubits can be reduced from {} to {} using this resizing.",
                self.original_qubits, self.minimum_qubits
            )?;
        }
        if self.truncated {
            writeln!(f, "(further plans of the same size were not enumerated)")?;
        }
        Ok(())
    }
}

/// Every intermediate product of one analysis run.
#[derive(Debug, Clone)]
pub struct ReuseAnalysis {
    /// The circuit the graphs were built from (single-qubit gates removed).
    pub circuit: Circuit,
    /// Gate dependency graph.
    pub dependencies: DependencyGraph,
    /// Qubit interaction graph.
    pub interactions: InteractionGraph,
    /// Last gate on each qubit.
    pub last_use: LastUse,
    /// Non-interacting, causally safe qubit pairs.
    pub candidates: Vec<ReuseCandidate>,
    /// Candidates with donor and recipient fixed.
    pub pairs: Vec<ReusePair>,
    /// The selected plans.
    pub report: ReuseReport,
}

/// Runs the reuse pipeline: filter, dependency and interaction graphs,
/// candidate search, orientation and plan selection.
#[derive(Debug, Clone, Default)]
pub struct QubitReuseAnalysis {
    config: ResizeConfig,
}

impl QubitReuseAnalysis {
    /// Creates an analysis with the given configuration.
    pub fn new(config: ResizeConfig) -> ResizeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Analyses `circuit` and keeps every intermediate result.
    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits, gates = circuit.len()))]
    pub fn analyze(&self, circuit: &Circuit) -> ResizeResult<ReuseAnalysis> {
        let mut pm = PassManager::new();
        if self.config.filter_single_qubit_gates {
            pm.add_pass(Box::new(SingleQubitFilter));
        }
        let circuit = pm.run(circuit)?;

        let dependencies = DependencyGraph::build(&circuit)?;
        let (interactions, last_use) = build_interaction_graph(&circuit)?;
        let candidates = find_reuse_candidates(&circuit, &dependencies, &interactions);
        let pairs = orient_pairs(&candidates, &last_use);
        let selection =
            ReuseSelector::new(self.config.plan_limit).select(&pairs, circuit.num_qubits);

        let report = ReuseReport {
            original_qubits: circuit.num_qubits,
            minimum_qubits: circuit.num_qubits - selection.matching_size,
            plans: selection.plans,
            truncated: selection.truncated,
        };
        info!(
            "Qubit reuse: {} -> {} qubits, {} plan(s)",
            report.original_qubits,
            report.minimum_qubits,
            report.plans.len()
        );

        Ok(ReuseAnalysis {
            circuit,
            dependencies,
            interactions,
            last_use,
            candidates,
            pairs,
            report,
        })
    }

    /// Analyses `circuit` and returns only the report.
    pub fn run(&self, circuit: &Circuit) -> ResizeResult<ReuseReport> {
        self.analyze(circuit).map(|analysis| analysis.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::GateType;

    #[test]
    fn test_single_qubit_circuit_keeps_width() {
        let report = QubitReuseAnalysis::default()
            .run(&Circuit::new(1))
            .unwrap();
        assert_eq!(report.minimum_qubits, 1);
        assert_eq!(report.plans, vec![ReusePlan::default()]);
        assert_eq!(report.reduction(), 0);
    }

    #[test]
    fn test_sequential_pairs_share_registers() {
        let mut circuit = Circuit::new(4);
        circuit.cx(0, 1).unwrap();
        circuit.cx(2, 3).unwrap();

        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        assert_eq!(analysis.candidates.len(), 4);
        assert_eq!(analysis.report.minimum_qubits, 2);
        assert_eq!(analysis.report.plans.len(), 2);
        for plan in &analysis.report.plans {
            assert!(plan.is_disjoint());
            assert!(plan.pairs().iter().all(|p| p.donor < 2 && p.recipient >= 2));
        }
    }

    #[test]
    fn test_idle_qubits_take_part_in_reuse() {
        let mut circuit = Circuit::new(5);
        circuit.cx(0, 1).unwrap();
        circuit.cx(1, 2).unwrap();

        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        assert_eq!(analysis.candidates.len(), 8);
        assert!(analysis.pairs.contains(&ReusePair::new(0, 2)));
        assert!(analysis.pairs.contains(&ReusePair::new(4, 1)));
        assert!(analysis.pairs.contains(&ReusePair::new(3, 4)));
        assert_eq!(analysis.report.original_qubits, 5);
        assert_eq!(analysis.report.minimum_qubits, 3);
        assert!(analysis.report.plans.iter().all(|plan| plan.len() == 2));
    }

    #[test]
    fn test_unfiltered_single_qubit_gate_is_rejected() {
        let mut circuit = Circuit::new(2);
        circuit.append(GateType::H, vec![0]).unwrap();
        circuit.cx(0, 1).unwrap();

        let analysis =
            QubitReuseAnalysis::new(ResizeConfig::new().with_single_qubit_filter(false)).unwrap();
        assert!(matches!(
            analysis.run(&circuit),
            Err(ResizeError::MalformedGate { got: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(QubitReuseAnalysis::new(ResizeConfig::new().with_plan_limit(0)).is_err());
    }

    #[test]
    fn test_report_json() {
        let mut circuit = Circuit::new(4);
        circuit.cx(0, 1).unwrap();
        circuit.cx(2, 3).unwrap();
        let report = QubitReuseAnalysis::default().run(&circuit).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["minimum_qubits"], 2);
        assert_eq!(json["plans"][0][0]["donor"], 0);
    }
}
