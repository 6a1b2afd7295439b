// src/paths/mod.rs

//! Simple-path enumeration and perturbed path scoring.
//!
//! Paths are enumerated once per graph and shared read-only across runs;
//! downstream code indexes into the list by position, so enumeration order
//! is deterministic (depth-first over sorted adjacency). Scores are
//! recomputed on every run because the random perturbation must differ.

use crate::core::RouteError;
use crate::graph::Graph;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// A simple path: an ordered node sequence of length ≥ 1 with no repeated
/// node, each consecutive pair connected by a graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    pub(crate) fn new(nodes: Vec<String>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    /// The node sequence, source first.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A one-node path has no edges.
    pub fn is_empty(&self) -> bool {
        false // length ≥ 1 by construction
    }

    /// Consecutive node pairs, one per traversed edge.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { " -> " } else { "" }, node)?;
        }
        Ok(())
    }
}

/// Produces the complete set of simple paths from `source` to `target`.
///
/// Order is depth-first over sorted adjacency: identical input yields an
/// identical sequence, every invocation, across process restarts. If
/// `source == target` the single one-node path is returned.
///
/// Fails with `NodeNotFound` if either endpoint is absent and `NoPath` if
/// the endpoints are disconnected. No path-length bound is imposed; scope
/// is graphs small enough for full enumeration to terminate promptly.
pub fn all_simple_paths(
    graph: &Graph,
    source: &str,
    target: &str,
) -> Result<Vec<Path>, RouteError> {
    for id in [source, target] {
        if !graph.contains_node(id) {
            return Err(RouteError::NodeNotFound { id: id.to_string() });
        }
    }

    if source == target {
        return Ok(vec![Path::new(vec![source.to_string()])]);
    }

    let mut paths = Vec::new();
    let mut trail = vec![source.to_string()];
    let mut visited: HashSet<String> = HashSet::from([source.to_string()]);
    extend_trail(graph, target, &mut trail, &mut visited, &mut paths);

    if paths.is_empty() {
        return Err(RouteError::NoPath {
            source: source.to_string(),
            target: target.to_string(),
        });
    }
    Ok(paths)
}

fn extend_trail(
    graph: &Graph,
    target: &str,
    trail: &mut Vec<String>,
    visited: &mut HashSet<String>,
    paths: &mut Vec<Path>,
) {
    let current = trail
        .last()
        .cloned()
        .unwrap_or_default();
    for (next, _) in graph.neighbors(&current) {
        if next == target {
            let mut complete = trail.clone();
            complete.push(target.to_string());
            paths.push(Path::new(complete));
            continue;
        }
        if visited.contains(next) {
            continue;
        }
        visited.insert(next.to_string());
        trail.push(next.to_string());
        extend_trail(graph, target, trail, visited, paths);
        trail.pop();
        visited.remove(next);
    }
}

/// Computes a path's perturbed cumulative weight: for each traversed edge,
/// the edge weight plus an independent uniform draw from
/// `[-perturbation, perturbation]`. A one-node path scores 0.
///
/// The randomness source is an explicit parameter so tests can substitute
/// a seeded generator; a `perturbation` of 0 degenerates to the exact
/// weight sum with no draws at all.
pub fn perturbed_score<R: Rng + ?Sized>(
    graph: &Graph,
    path: &Path,
    perturbation: f64,
    rng: &mut R,
) -> Result<f64, RouteError> {
    if !(perturbation.is_finite() && perturbation >= 0.0) {
        return Err(RouteError::InvalidOperation {
            message: format!("perturbation factor must be ≥ 0, got {perturbation}"),
        });
    }

    let mut total = 0.0;
    for (a, b) in path.edges() {
        total += graph.edge_weight(a, b)?;
        if perturbation > 0.0 {
            total += rng.random_range(-perturbation..=perturbation);
        }
    }
    Ok(total)
}
