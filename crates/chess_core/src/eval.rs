use crate::{board::Position, pcsq::TableSet, types::*};

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Table index for a piece of colour `c` on `sq`. Tables are written from
/// White's side of the board (a8 first), so White reads the rank-flipped
/// square and Black reads the square as is.
#[inline]
pub fn table_index(c: Color, sq: u8) -> usize {
    match c {
        Color::White => flip_rank(sq) as usize,
        Color::Black => sq as usize,
    }
}

fn positional(tables: &TableSet, pc: Piece, sq: u8) -> i32 {
    let table = match (pc.kind, pc.color) {
        (PieceKind::Pawn, _) => &tables.pawn,
        (PieceKind::Knight, _) => &tables.knight,
        (PieceKind::Bishop, _) => &tables.bishop,
        (PieceKind::King, Color::White) => &tables.king_white,
        (PieceKind::King, Color::Black) => &tables.king_black,
        (PieceKind::Rook | PieceKind::Queen, _) => return 0,
    };
    table.get(table_index(pc.color, sq))
}

/// Static evaluation from White's point of view.
///
/// Sums material plus the piece-square weight of every occupied square,
/// White positive and Black negative. Rooks and queens have no table;
/// kings have no material value. Missing kings and side to move make no
/// difference. Accumulates in `i64`, so any `i32` weights are safe.
pub fn evaluate(pos: &Position, tables: &TableSet) -> i64 {
    let mut score = 0i64;
    for sq in 0..64u8 {
        if let Some(pc) = pos.piece_at(sq) {
            let material = i64::from(PIECE_VALUES[pc.kind.idx()]);
            let v = material + i64::from(positional(tables, pc, sq));
            score += i64::from(pc.color.sign()) * v;
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
