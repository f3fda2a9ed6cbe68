//! Error type for everything that can stop a tuning run before it starts.
//!
//! Failures while scoring a candidate never show up here: the external
//! backend absorbs them per position and scores them as draws.

use std::path::PathBuf;

use chess_core::{FenError, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunerError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    InvalidSetting(String),
    #[error("invalid table file {}: {source}", path.display())]
    TableFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize tables: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("{}: no `{block}` block found", path.display())]
    MissingBlock { path: PathBuf, block: String },
    #[error("{}: `{block}` holds a value that does not fit a table weight", path.display())]
    MalformedBlock { path: PathBuf, block: String },
    #[error("invalid baseline tables: {0}")]
    Tables(#[from] TableError),
    #[error("no usable position in corpus ({entries} entries)")]
    EmptyCorpus { entries: usize },
    #[error("invalid corpus position {fen:?}: {source}")]
    InvalidPosition {
        fen: String,
        #[source]
        source: FenError,
    },
}

pub type Result<T> = std::result::Result<T, TunerError>;
