//! Piece-square table tuner
//!
//! Hill-climbs the six PCSQ tables of the native engine:
//! - loads baseline tables and a position corpus ([`provider`])
//! - scores candidates by self-play, in-process or through an external
//!   program ([`backend`], [`external`])
//! - keeps strictly improving mutations ([`optimizer`])
//! - writes the best tables as JSON ([`results`])
//!
//! # Usage
//!
//! ```bash
//! cargo run -p pcsq_tuner -- --config tuner.toml
//! cargo run -p pcsq_tuner -- --config tuner.toml --seed 7 --iterations 200
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod external;
pub mod optimizer;
pub mod provider;
pub mod results;
pub mod self_play;

pub use backend::*;
pub use config::TunerConfig;
pub use error::{Result, TunerError};
pub use external::ExternalProcessBackend;
pub use optimizer::*;
pub use provider::*;
pub use results::*;
pub use self_play::*;

use tracing::info;

/// Runs a whole tuning session as configured: load the baseline, climb,
/// then persist the best table set.
pub fn tune(config: &TunerConfig) -> Result<TuningReport> {
    let provider = config.build_provider();
    info!(source = %provider.describe(), "loading baseline");
    let baseline = provider.load()?;
    info!(positions = baseline.corpus.len(), "baseline loaded");

    let backend = config.build_backend();
    let mut optimizer =
        HillClimbOptimizer::new(config.hill_climb_config(), &*backend, config.rng());
    let report = optimizer.run(&baseline.tables, &baseline.corpus);

    let writer = JsonResultWriter::new(&config.output.path);
    writer.write(&report.state.best)?;
    info!(
        path = %writer.path().display(),
        score = report.state.best_score,
        "saved tuned tables"
    );

    Ok(report)
}
