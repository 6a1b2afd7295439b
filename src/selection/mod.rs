// src/selection/mod.rs

//! Reduces a run's outcome histogram to a single path index.
//!
//! The reduction rule is deliberately a pluggable policy: the shipped
//! `LeastFrequent` rule is a stated heuristic (infrequency read as a
//! signal of a distinct joint state), not a derived optimality result.

use crate::core::RouteError;
use crate::simulation::{Outcome, OutcomeHistogram};

/// A rule turning an outcome histogram into a path index in
/// `[0, num_paths)`.
pub trait SelectionPolicy {
    /// Selects a path index for a run with `num_paths` candidate paths.
    ///
    /// Fails with `EmptyHistogram` when no outcome was observed and with
    /// `InvalidOperation` when `num_paths` is 0.
    fn select(&self, histogram: &OutcomeHistogram, num_paths: usize)
    -> Result<usize, RouteError>;
}

/// Picks the outcome-integer with the minimum observed count, then reduces
/// it modulo `num_paths` (the outcome space has `2^k` values for `k` paths,
/// so most raw outcomes need remapping).
///
/// Ties on the minimum count break toward the smallest outcome-integer:
/// the histogram iterates in ascending order and only a strictly smaller
/// count displaces the current pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastFrequent;

impl SelectionPolicy for LeastFrequent {
    fn select(
        &self,
        histogram: &OutcomeHistogram,
        num_paths: usize,
    ) -> Result<usize, RouteError> {
        if num_paths == 0 {
            return Err(RouteError::InvalidOperation {
                message: "cannot select a path index out of zero paths".to_string(),
            });
        }

        let mut rarest: Option<(&Outcome, u64)> = None;
        for (outcome, count) in histogram.iter() {
            match rarest {
                Some((_, best)) if count >= best => {}
                _ => rarest = Some((outcome, count)),
            }
        }

        let (outcome, _) = rarest.ok_or(RouteError::EmptyHistogram)?;
        Ok(outcome.to_index(num_paths))
    }
}
