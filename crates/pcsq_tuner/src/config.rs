//! Run configuration, read from a TOML file.
//!
//! ```toml
//! [optimizer]
//! iterations = 10
//! batch_size = 5
//! step = 5
//! seed = 42
//!
//! [self_play]
//! ply_limit = 100
//!
//! [backend]
//! kind = "external"
//! program = "./selfplay"
//! timeout_ms = 5000
//!
//! [baseline]
//! kind = "engine-source"
//! tables = "Chess Engine/engine2.cpp"
//! positions = "Chess Engine/Chess Engine.cpp"
//!
//! [output]
//! path = "pcsq_tables.json"
//! ```
//!
//! Only `[baseline]` is required.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::backend::{InProcessBackend, ScoringBackend, DEFAULT_PLY_LIMIT};
use crate::error::{Result, TunerError};
use crate::external::{
    ExternalProcessBackend, DEFAULT_FIRST_TOKEN, DEFAULT_SECOND_TOKEN, DEFAULT_TIMEOUT_MS,
};
use crate::optimizer::HillClimbConfig;
use crate::provider::{
    ConfigProvider, EngineSourceProvider, JsonFileProvider, DEFAULT_POSITIONS_ARRAY,
};
use crate::results::DEFAULT_OUTPUT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TunerConfig {
    #[serde(default)]
    pub optimizer: OptimizerSection,
    #[serde(default)]
    pub self_play: SelfPlaySection,
    #[serde(default)]
    pub backend: BackendSection,
    pub baseline: BaselineSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerSection {
    pub iterations: u32,
    pub batch_size: usize,
    pub step: u32,
    /// Absent means seeded from entropy
    pub seed: Option<u64>,
    pub sample_batch: bool,
}

impl Default for OptimizerSection {
    fn default() -> Self {
        let d = HillClimbConfig::default();
        Self {
            iterations: d.iterations,
            batch_size: d.batch_size,
            step: d.step,
            seed: None,
            sample_batch: d.sample_batch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelfPlaySection {
    pub ply_limit: u32,
}

impl Default for SelfPlaySection {
    fn default() -> Self {
        Self {
            ply_limit: DEFAULT_PLY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BackendSection {
    #[default]
    InProcess,
    External {
        program: PathBuf,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
        #[serde(default = "default_first_token")]
        first_token: String,
        #[serde(default = "default_second_token")]
        second_token: String,
    },
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_first_token() -> String {
    DEFAULT_FIRST_TOKEN.to_string()
}

fn default_second_token() -> String {
    DEFAULT_SECOND_TOKEN.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BaselineSection {
    /// Scrape the native engine's C++ source
    EngineSource {
        tables: PathBuf,
        positions: PathBuf,
        #[serde(default = "default_positions_array")]
        positions_array: String,
    },
    /// A JSON table file plus a text corpus, one position per line
    Json { tables: PathBuf, positions: PathBuf },
}

fn default_positions_array() -> String {
    DEFAULT_POSITIONS_ARRAY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub path: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl TunerConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::provider::read_text(path)?;
        let config: TunerConfig = toml::from_str(&text).map_err(|source| TunerError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates config text. Errors are reported against
    /// `<inline>`.
    pub fn parse(text: &str) -> Result<Self> {
        let config: TunerConfig = toml::from_str(text).map_err(|source| TunerError::Config {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.optimizer.batch_size == 0 {
            return Err(TunerError::InvalidSetting(
                "optimizer.batch_size must be at least 1".into(),
            ));
        }
        if let BackendSection::External {
            program,
            timeout_ms,
            first_token,
            second_token,
        } = &self.backend
        {
            if program.as_os_str().is_empty() {
                return Err(TunerError::InvalidSetting(
                    "backend.program must not be empty".into(),
                ));
            }
            if *timeout_ms == 0 {
                return Err(TunerError::InvalidSetting(
                    "backend.timeout_ms must be greater than 0".into(),
                ));
            }
            if first_token.trim().is_empty() || first_token.trim() == second_token.trim() {
                return Err(TunerError::InvalidSetting(format!(
                    "backend tokens must be distinct and non-empty (got {first_token:?} and {second_token:?})"
                )));
            }
        }
        Ok(())
    }

    pub fn hill_climb_config(&self) -> HillClimbConfig {
        HillClimbConfig {
            iterations: self.optimizer.iterations,
            batch_size: self.optimizer.batch_size,
            step: self.optimizer.step,
            sample_batch: self.optimizer.sample_batch,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.optimizer.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn build_backend(&self) -> Box<dyn ScoringBackend> {
        match &self.backend {
            BackendSection::InProcess => Box::new(InProcessBackend::new(self.self_play.ply_limit)),
            BackendSection::External {
                program,
                timeout_ms,
                first_token,
                second_token,
            } => Box::new(
                ExternalProcessBackend::new(program)
                    .with_timeout(Duration::from_millis(*timeout_ms))
                    .with_tokens(first_token.trim(), second_token.trim()),
            ),
        }
    }

    pub fn build_provider(&self) -> Box<dyn ConfigProvider> {
        match &self.baseline {
            BaselineSection::EngineSource {
                tables,
                positions,
                positions_array,
            } => {
                let mut provider = EngineSourceProvider::new(tables, positions);
                provider.positions_array = positions_array.clone();
                Box::new(provider)
            }
            BaselineSection::Json { tables, positions } => {
                Box::new(JsonFileProvider::new(tables, positions))
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
