//! Transpiler passes and the qubit reuse pipeline.

pub mod analysis;
pub mod candidates;
pub mod dependency;
pub mod interaction;
pub mod orient;
pub mod pass;
pub mod selector;

pub use analysis::{QubitReuseAnalysis, ReuseAnalysis, ReuseReport};
pub use candidates::{find_reuse_candidates, ReuseCandidate};
pub use dependency::{DependencyGraph, Reachability};
pub use interaction::{build_interaction_graph, InteractionGraph, LastUse};
pub use orient::{orient_pairs, ReusePair};
pub use pass::{Pass, PassManager, SingleQubitFilter};
pub use selector::{ReusePlan, ReuseSelector, Selection};
