use crate::{
    board::Position, eval::evaluate, movegen::generate_moves_into, pcsq::TableSet, types::*,
};

/// One-ply greedy choice: play every pseudo-legal move, evaluate the
/// result statically and keep the best one for the mover. White maximises
/// the White-relative score, Black minimises it. Ties keep the move
/// generated first. No replies are considered.
///
/// Returns `None` when the side to move has no moves.
pub fn pick_greedy_move(pos: &Position, tables: &TableSet) -> Option<(Move, i64)> {
    let mut moves = Vec::with_capacity(64);
    generate_moves_into(pos, &mut moves);
    greedy_from(pos, tables, &moves)
}

/// Same as [`pick_greedy_move`] over a caller-provided move list.
pub fn greedy_from(pos: &Position, tables: &TableSet, moves: &[Move]) -> Option<(Move, i64)> {
    let maximizing = pos.side_to_move == Color::White;
    let mut best: Option<(Move, i64)> = None;

    for &mv in moves {
        let score = evaluate(&pos.apply_move(mv), tables);
        let better = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((mv, score));
        }
    }
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
