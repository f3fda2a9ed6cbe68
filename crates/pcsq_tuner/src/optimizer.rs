//! Hill-climbing over table weights
//!
//! Each iteration perturbs every weight of the current best table set by a
//! uniform integer offset in `[-step, step]`, scores the candidate on a fixed
//! batch, and keeps it only if it scores strictly higher. The loop always
//! runs the configured number of iterations.

use chess_core::TableSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::backend::ScoringBackend;
use crate::provider::StartingPosition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HillClimbConfig {
    /// Number of candidates to try
    pub iterations: u32,
    /// Positions per evaluation. Clamped to the corpus size.
    pub batch_size: usize,
    /// Largest absolute offset added to a weight
    pub step: u32,
    /// Sample the batch with the RNG instead of taking the leading positions
    pub sample_batch: bool,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            batch_size: 5,
            step: 5,
            sample_batch: false,
        }
    }
}

/// Returns a copy of `tables` with every weight moved by an independent
/// uniform offset in `[-step, step]`.
pub fn mutate<R: Rng>(tables: &TableSet, step: u32, rng: &mut R) -> TableSet {
    let step = i32::try_from(step).unwrap_or(i32::MAX);
    tables.map_weights(|_, w| w.saturating_add(rng.gen_range(-step..=step)))
}

/// The best table set found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerState {
    pub best: TableSet,
    pub best_score: i32,
    /// Iterations completed
    pub iteration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationRecord {
    pub iteration: u32,
    pub candidate_score: i32,
    /// Best score after this iteration
    pub best_score: i32,
    pub accepted: bool,
}

#[derive(Debug, Clone)]
pub struct TuningReport {
    pub baseline_score: i32,
    /// Number of positions each candidate was scored on
    pub batch_len: usize,
    pub state: OptimizerState,
    pub history: Vec<IterationRecord>,
}

impl TuningReport {
    pub fn improvements(&self) -> usize {
        self.history.iter().filter(|r| r.accepted).count()
    }
}

pub struct HillClimbOptimizer<'a, R: Rng> {
    config: HillClimbConfig,
    backend: &'a dyn ScoringBackend,
    rng: R,
}

impl<'a, R: Rng> HillClimbOptimizer<'a, R> {
    pub fn new(config: HillClimbConfig, backend: &'a dyn ScoringBackend, rng: R) -> Self {
        Self {
            config,
            backend,
            rng,
        }
    }

    pub fn config(&self) -> &HillClimbConfig {
        &self.config
    }

    /// Picks the batch used for the whole run.
    pub fn select_batch(&mut self, corpus: &[StartingPosition]) -> Vec<StartingPosition> {
        let n = self.config.batch_size.min(corpus.len());
        if self.config.sample_batch {
            corpus.choose_multiple(&mut self.rng, n).cloned().collect()
        } else {
            corpus[..n].to_vec()
        }
    }

    /// Scores the baseline, then runs the configured number of iterations.
    pub fn run(&mut self, baseline: &TableSet, corpus: &[StartingPosition]) -> TuningReport {
        let batch = self.select_batch(corpus);
        let baseline_score = self.backend.score(baseline, &batch);
        info!(
            backend = self.backend.name(),
            batch = batch.len(),
            score = baseline_score,
            "scored baseline"
        );

        let mut state = OptimizerState {
            best: baseline.clone(),
            best_score: baseline_score,
            iteration: 0,
        };
        let mut history = Vec::with_capacity(self.config.iterations as usize);

        for i in 0..self.config.iterations {
            let candidate = mutate(&state.best, self.config.step, &mut self.rng);
            let score = self.backend.score(&candidate, &batch);

            let accepted = score > state.best_score;
            if accepted {
                state.best = candidate;
                state.best_score = score;
                info!("Improved to {} at iteration {}", score, i);
            } else {
                debug!(iteration = i, score, best = state.best_score, "candidate rejected");
            }
            state.iteration = i + 1;

            history.push(IterationRecord {
                iteration: i,
                candidate_score: score,
                best_score: state.best_score,
                accepted,
            });
        }

        TuningReport {
            baseline_score,
            batch_len: batch.len(),
            state,
            history,
        }
    }
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod optimizer_tests;
