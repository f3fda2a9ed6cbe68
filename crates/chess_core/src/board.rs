use thiserror::Error;

use crate::types::*;

/// Reasons a position string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("position string is empty")]
    Empty,
    #[error("missing side-to-move field")]
    MissingSideToMove,
    #[error("expected 8 ranks in board section, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("rank {rank} describes {files} files")]
    FileCount { rank: usize, files: usize },
    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),
}

/// Piece placement plus side to move. Castling rights, en-passant target and
/// move clocks are not modelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
}

impl Position {
    pub fn empty(side_to_move: Color) -> Self {
        Position {
            board: [None; 64],
            side_to_move,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty(Color::White);

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parses the placement and side-to-move fields of a FEN string.
    ///
    /// Anything after the second field (castling, en-passant, clocks, EPD
    /// operations such as `bm Rxf4`) is accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().ok_or(FenError::Empty)?;
        let stm_part = parts.next().ok_or(FenError::MissingSideToMove)?;

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = [None; 64];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: usize = 0;
            let rank = 7 - rank_idx; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as usize;
                } else {
                    let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if file >= 8 {
                        return Err(FenError::FileCount {
                            rank: rank + 1,
                            files: file + 1,
                        });
                    }
                    board[rank * 8 + file] = Some(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::FileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        Ok(Position {
            board,
            side_to_move,
        })
    }

    /// Renders placement and side to move, with `- - 0 1` for the fields
    /// this model does not track.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push_str(match self.side_to_move {
            Color::White => " w",
            Color::Black => " b",
        });
        out.push_str(" - - 0 1");
        out
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Returns the position after `mv`: the moving piece lands on `mv.to`
    /// (removing whatever stood there), `mv.from` is cleared and the other
    /// side is to move. `self` is left untouched.
    pub fn apply_move(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let moved = next.piece_at(mv.from);
        next.set_piece(mv.from, None);
        next.set_piece(mv.to, moved);
        next.side_to_move = self.side_to_move.other();
        next
    }

    /// Mirrors the board across the horizontal axis and swaps piece
    /// colours and side to move. Evaluations of the result are the
    /// negation of the original's when the tables are colour-symmetric.
    pub fn color_flipped(&self) -> Position {
        let mut flipped = Position::empty(self.side_to_move.other());
        for sq in 0..64u8 {
            if let Some(pc) = self.piece_at(sq) {
                flipped.set_piece(flip_rank(sq), Some(Piece::new(pc.color.other(), pc.kind)));
            }
        }
        flipped
    }
}
