//! Baseline providers: where the starting tables and the position corpus
//! come from.
//!
//! Two adapters ship here. [`EngineSourceProvider`] scrapes the literal
//! arrays out of the native engine's C++ source. [`JsonFileProvider`] reads
//! a table file in the same JSON shape the tuner writes, plus a plain text
//! corpus. Tables are validated strictly. Corpus entries that do not parse
//! are dropped with a warning, since the engine's own position list has a
//! few defective ones.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chess_core::{Position, TableName, TableSet};
use regex::Regex;
use tracing::warn;

use crate::error::{Result, TunerError};

/// Default name of the position array in the engine source.
pub const DEFAULT_POSITIONS_ARRAY: &str = "fenArray";

/// A corpus entry: the original string (handed verbatim to external
/// programs) and its parsed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingPosition {
    pub fen: String,
    pub position: Position,
}

impl StartingPosition {
    pub fn parse(fen: &str) -> Result<Self> {
        let fen = fen.trim();
        let position = Position::from_fen(fen).map_err(|source| TunerError::InvalidPosition {
            fen: fen.to_string(),
            source,
        })?;
        Ok(Self {
            fen: fen.to_string(),
            position,
        })
    }
}

/// Validated starting point of a tuning run.
#[derive(Debug, Clone)]
pub struct Baseline {
    pub tables: TableSet,
    pub corpus: Vec<StartingPosition>,
}

impl Baseline {
    /// Parses every corpus entry. Entries that are not valid positions are
    /// skipped with a warning; the corpus must keep at least one.
    pub fn from_parts<S: AsRef<str>>(tables: TableSet, fens: &[S]) -> Result<Self> {
        let mut corpus = Vec::with_capacity(fens.len());
        for (index, fen) in fens.iter().enumerate() {
            match StartingPosition::parse(fen.as_ref()) {
                Ok(start) => corpus.push(start),
                Err(e) => warn!(index, error = %e, "skipping corpus entry"),
            }
        }
        if corpus.is_empty() {
            return Err(TunerError::EmptyCorpus {
                entries: fens.len(),
            });
        }
        Ok(Self { tables, corpus })
    }
}

/// Supplies the baseline tables and corpus.
pub trait ConfigProvider {
    /// Loads and validates. Any missing or malformed table is an error.
    fn load(&self) -> Result<Baseline>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// Engine source scraping
// =============================================================================

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("valid regex"));

/// Pulls the quoted strings out of `const char* <array>[] = { ... };`.
pub fn extract_positions(source: &str, array: &str) -> Option<Vec<String>> {
    let pattern = format!(
        r"const\s+char\s*\*\s*{}\s*\[\s*\]\s*=\s*\{{([^}}]*)\}}\s*;",
        regex::escape(array)
    );
    let re = Regex::new(&pattern).ok()?;
    let body = re.captures(source)?.get(1)?.as_str();
    Some(
        QUOTED
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect(),
    )
}

/// Pulls the integers out of `<ident>[64] = { ... };`. The length is not
/// checked here.
pub fn extract_table(source: &str, ident: &str) -> Option<Vec<i64>> {
    let pattern = format!(
        r"\b{}\s*\[\s*64\s*\]\s*=\s*\{{([^}}]+)\}}\s*;",
        regex::escape(ident)
    );
    let re = Regex::new(&pattern).ok()?;
    let body = re.captures(source)?.get(1)?.as_str();
    INTEGER
        .find_iter(body)
        .map(|m| m.as_str().parse::<i64>().ok())
        .collect()
}

/// Builds a [`TableSet`] from engine source text. `path` is only used in
/// error messages.
pub fn tables_from_source(source: &str, path: &Path) -> Result<TableSet> {
    let mut found: Vec<(TableName, Vec<i32>)> = Vec::with_capacity(TableName::ALL.len());
    for name in TableName::ALL {
        let Some(raw) = extract_table(source, name.ident()) else {
            continue;
        };
        let weights = raw
            .into_iter()
            .map(i32::try_from)
            .collect::<std::result::Result<Vec<i32>, _>>()
            .map_err(|_| TunerError::MalformedBlock {
                path: path.to_path_buf(),
                block: name.ident().to_string(),
            })?;
        found.push((name, weights));
    }
    let set = TableSet::from_named(found.iter().map(|(n, w)| (*n, w.as_slice())))?;
    Ok(set)
}

/// Reads tables and positions out of the native engine's source files.
#[derive(Debug, Clone)]
pub struct EngineSourceProvider {
    pub tables_path: PathBuf,
    pub positions_path: PathBuf,
    pub positions_array: String,
}

impl EngineSourceProvider {
    pub fn new(tables_path: impl Into<PathBuf>, positions_path: impl Into<PathBuf>) -> Self {
        Self {
            tables_path: tables_path.into(),
            positions_path: positions_path.into(),
            positions_array: DEFAULT_POSITIONS_ARRAY.to_string(),
        }
    }
}

impl ConfigProvider for EngineSourceProvider {
    fn load(&self) -> Result<Baseline> {
        let table_src = read_text(&self.tables_path)?;
        let tables = tables_from_source(&table_src, &self.tables_path)?;

        let pos_src = read_text(&self.positions_path)?;
        let fens = extract_positions(&pos_src, &self.positions_array).ok_or_else(|| {
            TunerError::MissingBlock {
                path: self.positions_path.clone(),
                block: self.positions_array.clone(),
            }
        })?;

        Baseline::from_parts(tables, &fens)
    }

    fn describe(&self) -> String {
        format!(
            "engine source (tables: {}, positions: {}[{}])",
            self.tables_path.display(),
            self.positions_path.display(),
            self.positions_array
        )
    }
}

// =============================================================================
// JSON tables + text corpus
// =============================================================================

/// Reads a JSON table file and a corpus with one position per line. Blank
/// lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    pub tables_path: PathBuf,
    pub positions_path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(tables_path: impl Into<PathBuf>, positions_path: impl Into<PathBuf>) -> Self {
        Self {
            tables_path: tables_path.into(),
            positions_path: positions_path.into(),
        }
    }
}

pub fn parse_corpus_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

impl ConfigProvider for JsonFileProvider {
    fn load(&self) -> Result<Baseline> {
        let tables = crate::results::load_tables(&self.tables_path)?;
        let text = read_text(&self.positions_path)?;
        Baseline::from_parts(tables, &parse_corpus_lines(&text))
    }

    fn describe(&self) -> String {
        format!(
            "json (tables: {}, positions: {})",
            self.tables_path.display(),
            self.positions_path.display()
        )
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TunerError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
