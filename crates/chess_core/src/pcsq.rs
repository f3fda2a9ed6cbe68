//! Piece-square tables.
//!
//! A [`TableSet`] holds the six tables the evaluator is parameterised by.
//! Each table is 64 signed weights laid out the way they read in engine
//! source: index 0 is a8, index 63 is h1, i.e. `(7 - rank) * 8 + file` for
//! a white piece. Black pieces read the rank-mirrored index.
//!
//! Tables are plain values. Nothing in this module mutates a table set in
//! place; producing a modified set means building a new one with
//! [`TableSet::map_weights`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TABLE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table has {0} entries, expected 64")]
    WrongLength(usize),
    #[error("table `{name}` has {len} entries, expected 64")]
    WrongLengthFor { name: TableName, len: usize },
    #[error("table `{0}` is missing")]
    Missing(TableName),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    Pawn,
    Knight,
    Bishop,
    KingWhite,
    KingBlack,
    KingEndgame,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::Pawn,
        TableName::Knight,
        TableName::Bishop,
        TableName::KingWhite,
        TableName::KingBlack,
        TableName::KingEndgame,
    ];

    /// Identifier used in engine source and in serialized table files.
    pub fn ident(self) -> &'static str {
        match self {
            TableName::Pawn => "pawn_pcsq",
            TableName::Knight => "knight_pcsq",
            TableName::Bishop => "bishop_pcsq",
            TableName::KingWhite => "king_pcsq",
            TableName::KingBlack => "king_pcsq_black",
            TableName::KingEndgame => "king_endgame_pcsq",
        }
    }

    pub fn from_ident(ident: &str) -> Option<TableName> {
        TableName::ALL.into_iter().find(|n| n.ident() == ident)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableName::Pawn => "pawn",
            TableName::Knight => "knight",
            TableName::Bishop => "bishop",
            TableName::KingWhite => "king-white",
            TableName::KingBlack => "king-black",
            TableName::KingEndgame => "king-endgame",
        })
    }
}

/// 64 weights, one per square. Serializes as a plain array and refuses to
/// deserialize from anything that is not exactly 64 long.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct Table([i32; TABLE_LEN]);

impl Table {
    pub const ZERO: Table = Table([0; TABLE_LEN]);

    pub fn new(weights: [i32; TABLE_LEN]) -> Self {
        Self(weights)
    }

    pub fn weights(&self) -> &[i32; TABLE_LEN] {
        &self.0
    }

    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.0[index]
    }

    pub fn map(&self, f: impl FnMut(i32) -> i32) -> Table {
        Table(self.0.map(f))
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::ZERO
    }
}

impl TryFrom<Vec<i32>> for Table {
    type Error = TableError;

    fn try_from(v: Vec<i32>) -> Result<Self, Self::Error> {
        let len = v.len();
        let arr: [i32; TABLE_LEN] = v.try_into().map_err(|_| TableError::WrongLength(len))?;
        Ok(Table(arr))
    }
}

impl TryFrom<&[i32]> for Table {
    type Error = TableError;

    fn try_from(v: &[i32]) -> Result<Self, Self::Error> {
        let arr: [i32; TABLE_LEN] = v
            .try_into()
            .map_err(|_| TableError::WrongLength(v.len()))?;
        Ok(Table(arr))
    }
}

impl From<Table> for Vec<i32> {
    fn from(t: Table) -> Self {
        t.0.to_vec()
    }
}

/// The six tables the evaluator reads.
///
/// `king_endgame` is carried along (loaded, mutated, persisted) but the
/// evaluator never looks at it.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSet {
    #[serde(rename = "pawn_pcsq")]
    pub pawn: Table,
    #[serde(rename = "knight_pcsq")]
    pub knight: Table,
    #[serde(rename = "bishop_pcsq")]
    pub bishop: Table,
    #[serde(rename = "king_pcsq")]
    pub king_white: Table,
    #[serde(rename = "king_pcsq_black")]
    pub king_black: Table,
    #[serde(rename = "king_endgame_pcsq")]
    pub king_endgame: Table,
}

impl TableSet {
    /// All-zero tables; evaluation then reduces to material.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Builds a set from named weight lists, checking that every table is
    /// present and exactly 64 long.
    pub fn from_named<'a, I>(tables: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (TableName, &'a [i32])>,
    {
        let mut slots: [Option<Table>; 6] = [None; 6];
        for (name, weights) in tables {
            let table = Table::try_from(weights).map_err(|_| TableError::WrongLengthFor {
                name,
                len: weights.len(),
            })?;
            slots[name as usize] = Some(table);
        }
        let take = |name: TableName| slots[name as usize].ok_or(TableError::Missing(name));
        Ok(TableSet {
            pawn: take(TableName::Pawn)?,
            knight: take(TableName::Knight)?,
            bishop: take(TableName::Bishop)?,
            king_white: take(TableName::KingWhite)?,
            king_black: take(TableName::KingBlack)?,
            king_endgame: take(TableName::KingEndgame)?,
        })
    }

    pub fn table(&self, name: TableName) -> &Table {
        match name {
            TableName::Pawn => &self.pawn,
            TableName::Knight => &self.knight,
            TableName::Bishop => &self.bishop,
            TableName::KingWhite => &self.king_white,
            TableName::KingBlack => &self.king_black,
            TableName::KingEndgame => &self.king_endgame,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TableName, &Table)> + '_ {
        TableName::ALL.into_iter().map(move |n| (n, self.table(n)))
    }

    /// Returns a new set with `f(name, weight)` applied to every weight,
    /// table by table in [`TableName::ALL`] order and square by square
    /// within a table.
    pub fn map_weights(&self, mut f: impl FnMut(TableName, i32) -> i32) -> TableSet {
        let mut apply = |name: TableName| self.table(name).map(|w| f(name, w));
        TableSet {
            pawn: apply(TableName::Pawn),
            knight: apply(TableName::Knight),
            bishop: apply(TableName::Bishop),
            king_white: apply(TableName::KingWhite),
            king_black: apply(TableName::KingBlack),
            king_endgame: apply(TableName::KingEndgame),
        }
    }
}

#[cfg(test)]
#[path = "pcsq_tests.rs"]
mod pcsq_tests;
