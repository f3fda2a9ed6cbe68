//! Simplified chess rules and static evaluation for piece-square tuning.
//!
//! The board model is deliberately small: piece placement and side to
//! move, pseudo-legal moves only (no castling, en passant, promotion or
//! check detection), and an evaluator that is a pure sum over occupied
//! squares driven by a [`TableSet`].

pub mod board;
pub mod eval;
pub mod movegen;
pub mod pcsq;
pub mod search;
pub mod types;

pub use board::*;
pub use eval::{evaluate, table_index, PIECE_VALUES};
pub use movegen::*;
pub use pcsq::*;
pub use search::*;
pub use types::*;
