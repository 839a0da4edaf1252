//! Graph engine for Rambler.
//!
//! This crate builds undirected, unweighted graphs and answers structural
//! questions about them: shortest paths by breadth-first search, degree /
//! closeness / betweenness centrality, and how a uniform random walk
//! compares with an optimal route in repeated Monte Carlo trials.
//!
//! Every component borrows the [`Graph`] immutably, so any number of them
//! can query one graph at once once construction is finished. Randomness
//! is always passed in by the caller.
//!
//! # Example
//!
//! ```
//! use rambler_graph::{evaluate, CentralityCalculator, Graph, PathFinder};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut graph = Graph::new();
//! for i in 1..=7u32 {
//!     graph.add_edge(i, i % 7 + 1)?;
//! }
//!
//! assert_eq!(PathFinder::new(&graph).shortest_path_length(&1, &4)?, 3);
//! assert_eq!(CentralityCalculator::new(&graph).degree_centrality(&5)?, 2);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let (walk, shortest) = evaluate(&graph, 500, &mut rng)?;
//! assert!(walk > shortest);
//! # Ok::<(), rambler_core::Error>(())
//! ```

pub mod centrality;
pub mod graph;
pub mod path;
pub mod simulation;
pub mod stats;
pub mod validation;
pub mod walk;

// Re-export key types at crate root for convenience
pub use centrality::{CentralityCalculator, CentralityReport};
pub use graph::{Edge, Graph, Node, NodeKey};
pub use path::{DistanceTable, PathFinder, SearchTree};
pub use simulation::{
    SimulationHarness, SimulationSummary, Strategy, StrategySummary, ensure_connected, evaluate,
};
pub use stats::{GraphStats, compute_stats, quick_summary, top_nodes_by_degree};
pub use validation::{ValidationIssue, ValidationResult, is_valid, validate_graph};
pub use walk::Walker;
