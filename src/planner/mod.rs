// src/planner/mod.rs

//! Per-run orchestration: score every candidate path, encode the scores
//! into a circuit, simulate, and select one path index. The multi-run
//! entry point replays this for a sequence of perturbation factors and
//! hands each selection across the `RouteSink` boundary to the external
//! visualization collaborator.

use crate::circuits::{RotationAxis, encode_scores};
use crate::core::RouteError;
use crate::graph::Graph;
use crate::paths::{Path, all_simple_paths, perturbed_score};
use crate::selection::{LeastFrequent, SelectionPolicy};
use crate::simulation::Simulator;
use log::{debug, info};
use rand::Rng;

/// One run's outcome, as handed to the visualization collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSelection {
    /// Zero-based run index within the plan.
    pub run: usize,
    /// The perturbation factor this run scored paths with.
    pub perturbation: f64,
    /// Index of the chosen path within the shared path list.
    pub selected: usize,
}

/// The boundary to the external visualization collaborator: it receives
/// the full graph, the full path list, and one selection per run, and is
/// responsible for any rendering or file persistence. The planner has no
/// dependency on those details.
pub trait RouteSink {
    /// Delivers one run's selection.
    fn emit(
        &mut self,
        graph: &Graph,
        paths: &[Path],
        selection: &RunSelection,
    ) -> Result<(), RouteError>;
}

/// A sink that drops everything; useful when only the returned selections
/// matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl RouteSink for DiscardSink {
    fn emit(&mut self, _: &Graph, _: &[Path], _: &RunSelection) -> Result<(), RouteError> {
        Ok(())
    }
}

/// Drives the scoring → encoding → simulation → selection pipeline.
///
/// The two randomness layers stay separate and injectable: the scorer's
/// perturbation draws and the simulator's measurement sampling each take
/// their own `Rng`, so either can be pinned to a seed in tests while
/// production runs use fresh OS-seeded generators per run.
pub struct RoutePlanner<P: SelectionPolicy = LeastFrequent> {
    simulator: Simulator,
    axis: RotationAxis,
    policy: P,
}

impl Default for RoutePlanner<LeastFrequent> {
    fn default() -> Self {
        Self {
            simulator: Simulator::new(),
            axis: RotationAxis::default(),
            policy: LeastFrequent,
        }
    }
}

impl RoutePlanner<LeastFrequent> {
    /// A planner with the stock configuration: 100 repetitions, phase
    /// (Rz) encoding, least-frequent selection.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SelectionPolicy> RoutePlanner<P> {
    /// Sets the measurement repetition count per run.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.simulator = Simulator::with_repetitions(repetitions);
        self
    }

    /// Chooses which rotation encodes a path's score (see `RotationAxis`
    /// for why the phase axis is the default).
    pub fn with_axis(mut self, axis: RotationAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Swaps in a different selection policy.
    pub fn with_policy<Q: SelectionPolicy>(self, policy: Q) -> RoutePlanner<Q> {
        RoutePlanner {
            simulator: self.simulator,
            axis: self.axis,
            policy,
        }
    }

    /// Executes one run over an already-enumerated path list and returns
    /// the selected path index.
    ///
    /// Fails with `NoPaths` when the list is empty; all other error kinds
    /// bubble up from the scorer, simulator, and selector untouched.
    pub fn select_route<R1, R2>(
        &self,
        graph: &Graph,
        paths: &[Path],
        perturbation: f64,
        score_rng: &mut R1,
        measure_rng: &mut R2,
    ) -> Result<usize, RouteError>
    where
        R1: Rng + ?Sized,
        R2: Rng + ?Sized,
    {
        if paths.is_empty() {
            return Err(RouteError::NoPaths);
        }

        let mut scores = Vec::with_capacity(paths.len());
        for path in paths {
            scores.push(perturbed_score(graph, path, perturbation, score_rng)?);
        }
        debug!("perturbation {perturbation}: scores {scores:?}");

        let circuit = encode_scores(&scores, self.axis);
        let histogram = self.simulator.run(&circuit, measure_rng)?;
        let selected = self.policy.select(&histogram, paths.len())?;
        debug!(
            "selected path {selected} of {} ({} distinct outcomes)",
            paths.len(),
            histogram.len()
        );
        Ok(selected)
    }

    /// Runs the full multi-run plan: enumerate paths once, then one
    /// independent run per perturbation factor, emitting each selection to
    /// `sink`. Returns the selections in run order.
    ///
    /// Runs deliberately draw from fresh OS-seeded generators, so repeated
    /// plans over identical input may pick different routes; run-to-run
    /// variability is the point. The path list itself is deterministic.
    pub fn plan(
        &self,
        graph: &Graph,
        source: &str,
        target: &str,
        perturbations: &[f64],
        sink: &mut dyn RouteSink,
    ) -> Result<Vec<RunSelection>, RouteError> {
        let paths = all_simple_paths(graph, source, target)?;
        info!(
            "enumerated {} candidate paths from {source} to {target}",
            paths.len()
        );

        let mut selections = Vec::with_capacity(perturbations.len());
        for (run, &perturbation) in perturbations.iter().enumerate() {
            let mut score_rng = rand::rng();
            let mut measure_rng = rand::rng();
            let selected =
                self.select_route(graph, &paths, perturbation, &mut score_rng, &mut measure_rng)?;
            info!("run {run}: perturbation {perturbation}, selected path {selected}");

            let selection = RunSelection {
                run,
                perturbation,
                selected,
            };
            sink.emit(graph, &paths, &selection)?;
            selections.push(selection);
        }
        Ok(selections)
    }
}
