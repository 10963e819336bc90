//! Property-based tests for the qubit reuse pipeline.

use std::collections::BTreeSet;

use proptest::prelude::*;
use q_resize::ir::{Circuit, GateType};
use q_resize::transpiler::{QubitReuseAnalysis, ReusePair, ReusePlan};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(usize),
    CX(usize, usize),
}

fn arb_gate_op(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        1 => (0..num_qubits).prop_map(GateOp::H),
        3 => (0..num_qubits, 0..num_qubits)
            .prop_filter("Control and target must differ", |(c, t)| c != t)
            .prop_map(|(c, t)| GateOp::CX(c, t)),
    ]
}

/// Circuits with 2-6 qubits and up to 12 gates.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_usize..=6).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=12).prop_map(move |ops| {
            let mut circuit = Circuit::new(num_qubits);
            for op in ops {
                let added = match op {
                    GateOp::H(q) => circuit.append(GateType::H, vec![q]),
                    GateOp::CX(c, t) => circuit.cx(c, t),
                };
                added.expect("generated gate is valid");
            }
            circuit
        })
    })
}

/// Every maximum qubit-disjoint subset of `pairs`, by exhaustive search.
fn brute_force_plans(pairs: &[ReusePair]) -> BTreeSet<ReusePlan> {
    let mut best = 0;
    let mut plans = BTreeSet::new();
    for mask in 0_u32..(1 << pairs.len()) {
        let chosen: Vec<ReusePair> = pairs
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, p)| *p)
            .collect();
        let plan = ReusePlan::new(chosen);
        if !plan.is_disjoint() {
            continue;
        }
        if plan.len() > best {
            best = plan.len();
            plans.clear();
        }
        if plan.len() == best {
            plans.insert(plan);
        }
    }
    plans
}

proptest! {
    #[test]
    fn test_dependency_graph_is_acyclic(circuit in arb_circuit()) {
        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        prop_assert!(analysis.dependencies.is_acyclic());
        for gate in analysis.circuit.gates() {
            prop_assert!(!analysis.dependencies.reaches(&gate.label, &gate.label));
        }
    }

    #[test]
    fn test_candidates_never_interact(circuit in arb_circuit()) {
        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        for c in &analysis.candidates {
            prop_assert!(c.low < c.high);
            prop_assert!(!analysis.interactions.neighbors(c.low).contains(&c.high));
            prop_assert!(!analysis.interactions.neighbors(c.high).contains(&c.low));
        }
    }

    #[test]
    fn test_candidates_have_no_mutual_dependency(circuit in arb_circuit()) {
        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        let gates = analysis.circuit.gates();
        for c in &analysis.candidates {
            for g1 in gates.iter().filter(|g| g.acts_on(c.low)) {
                for g2 in gates.iter().filter(|g| g.acts_on(c.high)) {
                    let deps = &analysis.dependencies;
                    prop_assert!(
                        !(deps.reaches(&g1.label, &g2.label) && deps.reaches(&g2.label, &g1.label))
                    );
                }
            }
        }
    }

    #[test]
    fn test_plans_are_maximum_and_consistent(circuit in arb_circuit()) {
        let analysis = QubitReuseAnalysis::default().analyze(&circuit).unwrap();
        let report = &analysis.report;
        let n = report.original_qubits;
        prop_assert!(!report.plans.is_empty());
        for plan in &report.plans {
            prop_assert!(plan.is_disjoint());
            prop_assert!(plan.len() <= n / 2);
            prop_assert_eq!(n - plan.len(), report.minimum_qubits);
            for pair in plan.pairs() {
                prop_assert!(analysis.pairs.contains(pair));
            }
        }

        let expected = brute_force_plans(&analysis.pairs);
        let found: BTreeSet<ReusePlan> = report.plans.iter().cloned().collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn test_analysis_is_deterministic(circuit in arb_circuit()) {
        let analysis = QubitReuseAnalysis::default();
        let first = analysis.run(&circuit).unwrap();
        let second = analysis.run(&circuit).unwrap();
        prop_assert_eq!(first, second);
    }
}
