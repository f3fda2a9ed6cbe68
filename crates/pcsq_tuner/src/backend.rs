//! Scoring backends
//!
//! A backend turns a candidate table set and a batch of starting positions
//! into a single integer score: the sum over the batch of +1 when the side
//! to move first came out ahead, -1 when the other side did and 0 for a
//! draw. Higher is better.

use chess_core::TableSet;
use tracing::trace;

use crate::provider::StartingPosition;
use crate::self_play::play_game;

/// Default number of plies before a self-play game is called a draw.
pub const DEFAULT_PLY_LIMIT: u32 = 100;

/// Scores candidate tables over a batch of positions.
///
/// Scoring never fails as a whole. Backends that can fail per position
/// count that position as 0.
pub trait ScoringBackend {
    /// Backend name for logs
    fn name(&self) -> &str;

    fn score(&self, tables: &TableSet, batch: &[StartingPosition]) -> i32;
}

/// Plays every position out with the built-in greedy mover.
#[derive(Debug, Clone)]
pub struct InProcessBackend {
    pub ply_limit: u32,
}

impl InProcessBackend {
    pub fn new(ply_limit: u32) -> Self {
        Self { ply_limit }
    }
}

impl Default for InProcessBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PLY_LIMIT)
    }
}

impl ScoringBackend for InProcessBackend {
    fn name(&self) -> &str {
        "in-process"
    }

    fn score(&self, tables: &TableSet, batch: &[StartingPosition]) -> i32 {
        batch
            .iter()
            .map(|start| {
                let outcome = play_game(&start.position, tables, self.ply_limit);
                trace!(fen = %start.fen, ?outcome, "self-play finished");
                outcome.contribution()
            })
            .sum()
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
