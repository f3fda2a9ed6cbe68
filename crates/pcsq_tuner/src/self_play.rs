//! Bounded self-play with the greedy one-ply mover.

use chess_core::{Position, TableSet, generate_moves_into, greedy_from};

/// How a self-play game ended, relative to the side that moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The side to move in the starting position came out ahead.
    FirstSideFavored,
    /// The other side came out ahead.
    SecondSideFavored,
    /// The ply limit ran out.
    Drawn,
}

impl GameOutcome {
    /// Signed contribution to a batch score: +1, -1 or 0.
    pub fn contribution(self) -> i32 {
        match self {
            GameOutcome::FirstSideFavored => 1,
            GameOutcome::SecondSideFavored => -1,
            GameOutcome::Drawn => 0,
        }
    }
}

/// Plays `start` out with both sides using `tables`, for at most
/// `ply_limit` plies.
///
/// A side with no pseudo-legal moves loses on the spot. There is no check
/// detection, so this covers mate and stalemate alike. Reaching the ply
/// limit is a draw.
pub fn play_game(start: &Position, tables: &TableSet, ply_limit: u32) -> GameOutcome {
    let mut pos = start.clone();
    let mut first_to_move = true;
    let mut moves = Vec::with_capacity(64);

    for _ply in 0..ply_limit {
        generate_moves_into(&pos, &mut moves);

        // Stuck: the side to move loses
        let Some((mv, _)) = greedy_from(&pos, tables, &moves) else {
            return if first_to_move {
                GameOutcome::SecondSideFavored
            } else {
                GameOutcome::FirstSideFavored
            };
        };

        pos = pos.apply_move(mv);
        first_to_move = !first_to_move;
    }

    GameOutcome::Drawn
}

#[cfg(test)]
#[path = "self_play_tests.rs"]
mod self_play_tests;
