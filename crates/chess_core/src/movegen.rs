//! Pseudo-legal move generation.
//!
//! Moves follow piece movement rules only. Nothing is filtered for king
//! safety, and there is no castling, en passant or promotion: a pawn that
//! reaches the last rank stays a pawn and simply has no forward moves.

use crate::{board::Position, types::*};

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const ROYAL: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Generate all pseudo-legal moves for the side to move.
pub fn generate_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(48);
    generate_moves_into(pos, &mut out);
    out
}

/// Generate into the provided buffer, clearing it first.
///
/// Moves are emitted square by square from a1 to h8, so the order is stable
/// for a given position.
pub fn generate_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => pawn_moves(pos, from, us, out),
            PieceKind::Knight => rays(pos, from, us, &KNIGHT, 1, out),
            PieceKind::Bishop => rays(pos, from, us, &DIAGONAL, 7, out),
            PieceKind::Rook => rays(pos, from, us, &ORTHOGONAL, 7, out),
            PieceKind::Queen => rays(pos, from, us, &ROYAL, 7, out),
            PieceKind::King => rays(pos, from, us, &ROYAL, 1, out),
        }
    }
}

fn pawn_moves(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    let fwd = us.forward();

    // Pushes: one step, then a second from the home rank if the path is clear
    let max_push = if r == us.pawn_home_rank() { 2 } else { 1 };
    for n in 1..=max_push {
        match sq(f, r + n * fwd) {
            Some(to) if pos.piece_at(to).is_none() => out.push(Move::new(from, to)),
            _ => break,
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + fwd) else {
            continue;
        };
        if pos.piece_at(to).is_some_and(|pc| pc.color != us) {
            out.push(Move::new(from, to));
        }
    }
}

/// Walks each direction up to `reach` squares, stopping at the board edge,
/// before an own piece, or on an enemy piece (which is captured).
fn rays(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], reach: i8, out: &mut Vec<Move>) {
    let (f0, r0) = (file_of(from), rank_of(from));
    for &(df, dr) in dirs {
        for n in 1..=reach {
            let Some(to) = sq(f0 + n * df, r0 + n * dr) else {
                break;
            };
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
