// src/lib.rs

//! `qroute` - quantum-inspired route selection over weighted street graphs
//!
//! Selects one route among all simple paths between two intersections by
//! encoding each path's perturbed cumulative weight into a single-qubit
//! rotation, simulating the joint state, sampling repeated measurements,
//! and mapping the least-frequent outcome to a path index. The selection
//! rule is a stated heuristic, not a provably optimal quantum algorithm.
//!
//! # Example
//!
//! ```
//! use qroute::{Graph, RoutePlanner, RouteError, all_simple_paths};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! fn main() -> Result<(), RouteError> {
//!     let mut graph = Graph::new();
//!     graph.add_edge("A", "B", 10.0)?;
//!     graph.add_edge("B", "C", 10.0)?;
//!     graph.add_edge("A", "C", 25.0)?;
//!
//!     // Paths are enumerated once and shared across runs; the order is
//!     // deterministic, so indices stay stable.
//!     let paths = all_simple_paths(&graph, "A", "C")?;
//!     assert_eq!(paths.len(), 2);
//!
//!     // One run with seeded perturbation and measurement randomness.
//!     let planner = RoutePlanner::new();
//!     let mut score_rng = StdRng::seed_from_u64(1);
//!     let mut measure_rng = StdRng::seed_from_u64(2);
//!     let selected = planner.select_route(&graph, &paths, 5.0, &mut score_rng, &mut measure_rng)?;
//!     assert!(selected < paths.len());
//!     println!("chosen route: {}", paths[selected]);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod graph;
pub mod paths;
pub mod circuits;
pub mod simulation;
pub mod selection;
pub mod planner;

// Re-export the most common types for easier top-level use
pub use core::{QubitId, RouteError, StateVector};
pub use graph::Graph;
pub use paths::{Path, all_simple_paths, perturbed_score};
pub use circuits::{Circuit, CircuitBuilder, Operation, RotationAxis, encode_scores};
pub use simulation::{DEFAULT_REPETITIONS, Outcome, OutcomeHistogram, Simulator};
pub use selection::{LeastFrequent, SelectionPolicy};
pub use planner::{DiscardSink, RoutePlanner, RouteSink, RunSelection};
