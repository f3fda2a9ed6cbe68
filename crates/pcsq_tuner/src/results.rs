//! Tuned table storage

use std::path::{Path, PathBuf};

use chess_core::TableSet;

use crate::error::{Result, TunerError};

/// Default output file, next to wherever the tuner runs.
pub const DEFAULT_OUTPUT: &str = "pcsq_tables.json";

/// Persists the final table set once a run is over.
pub trait ResultWriter {
    fn write(&self, tables: &TableSet) -> Result<()>;
}

/// Writes tables as a pretty-printed JSON object of six 64-element arrays,
/// replacing any existing file.
#[derive(Debug, Clone)]
pub struct JsonResultWriter {
    path: PathBuf,
}

impl JsonResultWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultWriter for JsonResultWriter {
    fn write(&self, tables: &TableSet) -> Result<()> {
        save_tables(tables, &self.path)
    }
}

/// Save tables to a JSON file
pub fn save_tables(tables: &TableSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tables).map_err(TunerError::Serialize)?;
    std::fs::write(path, json).map_err(|source| TunerError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load tables from a JSON file. All six tables must be present with 64
/// entries each.
pub fn load_tables(path: &Path) -> Result<TableSet> {
    let contents = crate::provider::read_text(path)?;
    serde_json::from_str(&contents).map_err(|source| TunerError::TableFile {
        path: path.to_path_buf(),
        source,
    })
}
