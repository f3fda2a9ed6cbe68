//! Scoring through an external self-play program.
//!
//! For every position the program is started as `<program> <fen> <tables>`
//! where `<tables>` is a JSON file holding the candidate. It is expected to
//! play the candidate against its own reference tables and print a single
//! token naming the winner. Each run is bounded by a timeout and the child
//! is killed on every path out of [`ExternalProcessBackend::run_one`].

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chess_core::TableSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::ScoringBackend;
use crate::provider::StartingPosition;

/// Per-position budget. The program must exit within it; its output is
/// read until it exits plus [`DRAIN_GRACE`]. Output written later by
/// processes it left running is ignored, and the reader thread for that
/// call lives until they close stdout.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_FIRST_TOKEN: &str = "engine1";
pub const DEFAULT_SECOND_TOKEN: &str = "engine2";

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Why a single invocation produced no usable result.
#[derive(Debug, Error)]
enum InvocationError {
    #[error("failed to start: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("no stdout handle")]
    NoStdout,
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("exited with {0}")]
    Failed(ExitStatus),
    #[error("failed to wait: {0}")]
    Wait(#[source] std::io::Error),
}

/// Kills and reaps the child when dropped, unless it has already exited.
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        match self.0.try_wait() {
            Ok(Some(_status)) => {}
            _ => {
                let _ = self.0.kill();
                let _ = self.0.wait();
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExternalProcessBackend {
    pub program: PathBuf,
    pub timeout: Duration,
    /// Printed when the candidate wins
    pub first_token: String,
    /// Printed when the reference wins
    pub second_token: String,
}

impl ExternalProcessBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            first_token: DEFAULT_FIRST_TOKEN.to_string(),
            second_token: DEFAULT_SECOND_TOKEN.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tokens(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_token = first.into();
        self.second_token = second.into();
        self
    }

    /// Maps program output to a contribution. Anything but one of the two
    /// tokens counts as a draw.
    pub fn contribution(&self, output: &str) -> Option<i32> {
        let token = output.trim();
        if token == self.first_token {
            Some(1)
        } else if token == self.second_token {
            Some(-1)
        } else {
            None
        }
    }

    fn run_one(&self, fen: &str, tables_path: &Path) -> Result<String, InvocationError> {
        let child = Command::new(&self.program)
            .arg(fen)
            .arg(tables_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(InvocationError::Spawn)?;
        let mut guard = ChildGuard(child);
        let stdout = guard.0.stdout.take().ok_or(InvocationError::NoStdout)?;

        let (tx, rx) = mpsc::channel::<String>();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(std::result::Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let deadline = Instant::now() + self.timeout;
        let mut lines = Vec::new();
        loop {
            while let Ok(line) = rx.try_recv() {
                lines.push(line);
            }
            match guard.0.try_wait().map_err(InvocationError::Wait)? {
                Some(status) => {
                    drain(&rx, &mut lines);
                    return if status.success() {
                        Ok(lines.join("\n"))
                    } else {
                        Err(InvocationError::Failed(status))
                    };
                }
                None if Instant::now() >= deadline => {
                    return Err(InvocationError::Timeout(self.timeout));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

/// Collects output still in flight after the child exited. Stops at EOF or
/// after [`DRAIN_GRACE`], whichever comes first, so a grandchild that keeps
/// the pipe open cannot hold the run.
fn drain(rx: &mpsc::Receiver<String>, lines: &mut Vec<String>) {
    let until = Instant::now() + DRAIN_GRACE;
    while let Some(left) = until.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(line) => lines.push(line),
            Err(_) => break,
        }
    }
}

impl ScoringBackend for ExternalProcessBackend {
    fn name(&self) -> &str {
        "external"
    }

    fn score(&self, tables: &TableSet, batch: &[StartingPosition]) -> i32 {
        let file = match write_candidate(tables) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "could not write candidate tables, scoring batch as drawn");
                return 0;
            }
        };

        let mut total = 0;
        for start in batch {
            match self.run_one(&start.fen, file.path()) {
                Ok(output) => match self.contribution(&output) {
                    Some(c) => {
                        debug!(fen = %start.fen, contribution = c, "external game finished");
                        total += c;
                    }
                    None => {
                        warn!(fen = %start.fen, output = %output.trim(), "unrecognized output, counting as draw");
                    }
                },
                Err(e) => {
                    warn!(
                        program = %self.program.display(),
                        fen = %start.fen,
                        error = %e,
                        "external game failed, counting as draw"
                    );
                }
            }
        }
        total
    }
}

fn write_candidate(tables: &TableSet) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("pcsq_candidate_")
        .suffix(".json")
        .tempfile()?;
    serde_json::to_writer_pretty(file.as_file_mut(), tables)?;
    Ok(file)
}

#[cfg(test)]
#[path = "external_tests.rs"]
mod external_tests;
