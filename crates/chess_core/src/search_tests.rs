use super::*;
use crate::{eval::table_index, pcsq::Table};

#[test]
fn test_white_takes_the_queen() {
    // Rook on a1 can take a queen on a8 or a knight on h1
    let pos = Position::from_fen("q3k3/8/8/8/8/8/8/R3K2n w - - 0 1").unwrap();
    let (mv, score) = pick_greedy_move(&pos, &TableSet::zeroed()).unwrap();
    assert_eq!(mv.to_string(), "a1a8");
    assert_eq!(score, 500 - 320);
}

#[test]
fn test_black_minimizes() {
    let pos = Position::from_fen("r3k2N/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
    let (mv, score) = pick_greedy_move(&pos, &TableSet::zeroed()).unwrap();
    assert_eq!(mv.to_string(), "a8a1");
    assert_eq!(score, 320 - 500);
}

#[test]
fn test_ties_keep_first_generated_move() {
    // With zero tables every quiet move scores the same
    let pos = Position::startpos();
    let moves = crate::movegen::generate_moves(&pos);
    let (mv, score) = pick_greedy_move(&pos, &TableSet::zeroed()).unwrap();
    assert_eq!(mv, moves[0]);
    assert_eq!(score, 0);
}

#[test]
fn test_no_moves_returns_none() {
    let pos = Position::from_fen("k7/8/8/8/8/8/8/8 w - - 0 1").unwrap();
    assert!(pick_greedy_move(&pos, &TableSet::zeroed()).is_none());
}

#[test]
fn test_input_position_is_untouched() {
    let pos = Position::startpos();
    let before = pos.clone();
    let _ = pick_greedy_move(&pos, &TableSet::zeroed());
    assert_eq!(pos, before);
}

#[test]
fn test_extreme_weights_keep_greedy_order() {
    // Every pawn square is worth nearly i32::MAX except e4, worth more
    let mut weights = [i32::MAX - 100; 64];
    weights[table_index(Color::White, coord_to_sq("e4").unwrap())] = i32::MAX;
    let tables = TableSet {
        pawn: Table::new(weights),
        ..TableSet::zeroed()
    };
    let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let (mv, score) = pick_greedy_move(&pos, &tables).unwrap();
    assert_eq!(mv.to_string(), "e2e4");
    assert_eq!(score, 100 + i64::from(i32::MAX));
}
