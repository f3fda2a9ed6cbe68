//! PCSQ tuner CLI
//!
//! Reads a TOML run configuration, hill-climbs the tables and writes the
//! best set as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pcsq_tuner::{tune, TunerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hill-climbing tuner for piece-square tables", long_about = None)]
struct Args {
    /// Run configuration (TOML)
    #[arg(short, long, default_value = "tuner.toml")]
    config: PathBuf,

    /// Seed for mutation and batch sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of candidates to try
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Where to write the tuned tables
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = TunerConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.optimizer.seed = Some(seed);
    }
    if let Some(iterations) = args.iterations {
        config.optimizer.iterations = iterations;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }

    let report = tune(&config).context("tuning run failed")?;

    println!();
    println!("Baseline score: {}", report.baseline_score);
    println!(
        "Best score:     {} ({} of {} candidates accepted, batch of {})",
        report.state.best_score,
        report.improvements(),
        report.history.len(),
        report.batch_len
    );
    println!("Tables written to {}", config.output.path.display());

    Ok(())
}
