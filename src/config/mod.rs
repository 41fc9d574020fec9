//! Configuration module
//!
//! Handles CLI argument parsing, duration parsing, and validation.

pub mod cli;

use crate::Result;
use anyhow::{bail, Context};
use std::path::PathBuf;
use std::time::Duration;

/// Complete coordination configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Input directory shared by all workers
    pub inputdir: PathBuf,
    /// Output directory; the scratch directory lives underneath it
    pub outputdir: PathBuf,
    /// Declared worker count, constant for the whole round
    pub workers: u64,
    /// Downstream workload executable
    pub exec: PathBuf,
    /// Registration barrier timeout
    pub timeout: Duration,
    /// Interval between barrier polls
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_cli(cli: &cli::Cli) -> Result<Self> {
        let timeout = parse_duration(&cli.timeout).context("Invalid timeout")?;
        let poll_interval =
            parse_duration(&cli.poll_interval).context("Invalid poll interval")?;

        Ok(Self {
            inputdir: cli.inputdir.clone(),
            outputdir: cli.outputdir.clone(),
            workers: cli.workers,
            exec: cli.exec.clone(),
            timeout,
            poll_interval,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            bail!("Worker count must be a positive integer");
        }
        if self.poll_interval.is_zero() {
            bail!("Poll interval must be non-zero");
        }
        if self.poll_interval > self.timeout {
            bail!(
                "Poll interval ({:?}) exceeds barrier timeout ({:?})",
                self.poll_interval,
                self.timeout
            );
        }
        if !self.outputdir.is_dir() {
            bail!(
                "Output directory does not exist: {}",
                self.outputdir.display()
            );
        }
        if !self.exec.exists() {
            bail!("Workload executable not found: {}", self.exec.display());
        }
        Ok(())
    }
}

/// Parse a duration string (e.g., "250ms", "60s", "5m", "1h")
///
/// A bare number is interpreted as seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    let (num_str, unit_millis) = if s.ends_with("ms") {
        (s.trim_end_matches("ms"), 1u64)
    } else if s.ends_with("h") || s.ends_with("hr") {
        (s.trim_end_matches("hr").trim_end_matches("h"), 3_600_000)
    } else if s.ends_with("min") {
        (s.trim_end_matches("min"), 60_000)
    } else if s.ends_with("m") {
        (s.trim_end_matches("m"), 60_000)
    } else if s.ends_with("s") || s.ends_with("sec") {
        (s.trim_end_matches("sec").trim_end_matches("s"), 1_000)
    } else {
        (s.as_str(), 1_000)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    Ok(Duration::from_millis(num * unit_millis))
}
