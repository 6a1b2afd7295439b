// src/graph/mod.rs

//! Weighted undirected graph of intersections and streets.
//!
//! The graph is built once, then shared read-only by every run: path
//! enumeration indexes into it by position, so node and neighbor iteration
//! order must be identical every time the same topology is constructed.
//! `BTreeMap` adjacency makes that order content-determined rather than
//! hash-seed-determined.

use crate::core::RouteError;
use std::collections::BTreeMap;
use std::fmt;

/// The fixed street scenario: 30 weighted streets over intersections
/// `N1`..`N20` in a layered grid-like topology. A scenario constant, not
/// derived data; reimplementations must keep this table identical for
/// outputs to stay comparable.
const STREET_EDGES: [(&str, &str, f64); 30] = [
    ("N1", "N2", 30.0),
    ("N1", "N3", 25.0),
    ("N2", "N4", 20.0),
    ("N2", "N5", 35.0),
    ("N3", "N6", 40.0),
    ("N3", "N7", 50.0),
    ("N4", "N8", 45.0),
    ("N4", "N9", 30.0),
    ("N5", "N10", 60.0),
    ("N6", "N11", 55.0),
    ("N7", "N12", 70.0),
    ("N8", "N13", 50.0),
    ("N9", "N14", 45.0),
    ("N10", "N15", 40.0),
    ("N11", "N16", 35.0),
    ("N12", "N17", 25.0),
    ("N13", "N18", 20.0),
    ("N14", "N19", 50.0),
    ("N15", "N20", 45.0),
    ("N16", "N18", 30.0),
    ("N17", "N19", 35.0),
    ("N18", "N20", 40.0),
    ("N19", "N20", 60.0),
    ("N1", "N10", 55.0),
    ("N5", "N15", 50.0),
    ("N3", "N12", 60.0),
    ("N2", "N11", 45.0),
    ("N6", "N14", 35.0),
    ("N4", "N19", 30.0),
    ("N8", "N16", 40.0),
];

/// An undirected graph with at most one positively weighted edge per
/// unordered node pair. Weights are fixed at construction time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    /// Symmetric adjacency: each undirected edge appears under both
    /// endpoints with the same weight.
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the fixed 20-intersection street scenario used by the
    /// route-selection demo (`N1`..`N20`, 30 weighted streets).
    pub fn street_grid() -> Self {
        let mut graph = Self::new();
        for i in 1..=20 {
            graph.add_node(format!("N{i}"));
        }
        for (a, b, weight) in STREET_EDGES {
            graph.insert_pair(a, b, weight);
        }
        graph
    }

    /// Adds an isolated node. Re-adding an existing node is a no-op so
    /// topology construction stays idempotent.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Adds an undirected edge with a positive weight, creating either
    /// endpoint if absent.
    ///
    /// Fails with `InvalidOperation` for non-positive or non-finite
    /// weights, self-loops, and duplicate unordered pairs: weights are
    /// immutable once declared, so a second declaration is a conflict,
    /// never an update.
    pub fn add_edge(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        weight: f64,
    ) -> Result<(), RouteError> {
        let a = a.into();
        let b = b.into();
        if !(weight.is_finite() && weight > 0.0) {
            return Err(RouteError::InvalidOperation {
                message: format!("edge ({a}, {b}) weight must be a positive real, got {weight}"),
            });
        }
        if a == b {
            return Err(RouteError::InvalidOperation {
                message: format!("self-loop on {a} is not a street"),
            });
        }
        if self.adjacency.get(&a).is_some_and(|n| n.contains_key(&b)) {
            return Err(RouteError::InvalidOperation {
                message: format!("edge ({a}, {b}) already declared; weights are immutable"),
            });
        }
        self.insert_pair(&a, &b, weight);
        Ok(())
    }

    // Unchecked symmetric insertion, shared by `add_edge` and the static
    // scenario table (whose entries are known valid).
    fn insert_pair(&mut self, a: &str, b: &str, weight: f64) {
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), weight);
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), weight);
    }

    /// Whether the graph contains a node with this id.
    pub fn contains_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// The weight of the edge between `a` and `b`.
    ///
    /// Fails with `EdgeNotFound` if the nodes are not directly connected.
    pub fn edge_weight(&self, a: &str, b: &str) -> Result<f64, RouteError> {
        self.adjacency
            .get(a)
            .and_then(|neighbors| neighbors.get(b))
            .copied()
            .ok_or_else(|| RouteError::EdgeNotFound {
                a: a.to_string(),
                b: b.to_string(),
            })
    }

    /// Neighbors of `id` with their edge weights, in sorted node order.
    /// Unknown nodes yield an empty iterator; existence checks belong to
    /// `contains_node`.
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = (&str, f64)> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(n, w)| (n.as_str(), *w)))
    }

    /// All node ids in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(|s| s.as_str())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Every undirected edge exactly once, as `(a, b, weight)` with
    /// `a < b`, in sorted order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.adjacency.iter().flat_map(|(a, neighbors)| {
            neighbors
                .iter()
                .filter(move |(b, _)| a.as_str() < b.as_str())
                .map(move |(b, w)| (a.as_str(), b.as_str(), *w))
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph[{} nodes, {} edges]",
            self.node_count(),
            self.edge_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_creates_symmetric_entry() -> Result<(), RouteError> {
        let mut g = Graph::new();
        g.add_edge("A", "B", 10.0)?;
        assert_eq!(g.edge_weight("A", "B")?, 10.0);
        assert_eq!(g.edge_weight("B", "A")?, 10.0);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        Ok(())
    }

    #[test]
    fn duplicate_edge_is_rejected() -> Result<(), RouteError> {
        let mut g = Graph::new();
        g.add_edge("A", "B", 10.0)?;
        let err = g.add_edge("B", "A", 12.0).unwrap_err();
        assert!(matches!(err, RouteError::InvalidOperation { .. }));
        // Original weight untouched.
        assert_eq!(g.edge_weight("A", "B")?, 10.0);
        Ok(())
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let mut g = Graph::new();
        assert!(g.add_edge("A", "B", 0.0).is_err());
        assert!(g.add_edge("A", "B", -3.0).is_err());
        assert!(g.add_edge("A", "B", f64::NAN).is_err());
    }

    #[test]
    fn missing_edge_lookup_fails() {
        let mut g = Graph::new();
        g.add_node("A");
        g.add_node("B");
        assert_eq!(
            g.edge_weight("A", "B"),
            Err(RouteError::EdgeNotFound {
                a: "A".to_string(),
                b: "B".to_string()
            })
        );
    }

    #[test]
    fn street_grid_matches_scenario() {
        let g = Graph::street_grid();
        assert_eq!(g.node_count(), 20);
        assert_eq!(g.edge_count(), 30);
        assert_eq!(g.edge_weight("N1", "N2"), Ok(30.0));
        assert_eq!(g.edge_weight("N19", "N20"), Ok(60.0));
        assert_eq!(g.edge_weight("N8", "N16"), Ok(40.0));
    }

    #[test]
    fn iteration_order_is_replayable() {
        let a = Graph::street_grid();
        let b = Graph::street_grid();
        assert_eq!(
            a.nodes().collect::<Vec<_>>(),
            b.nodes().collect::<Vec<_>>()
        );
        assert_eq!(
            a.neighbors("N2").collect::<Vec<_>>(),
            b.neighbors("N2").collect::<Vec<_>>()
        );
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }
}
