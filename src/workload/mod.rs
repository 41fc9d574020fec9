//! Downstream workload handoff
//!
//! Once coordination completes, each process invokes the workload executable
//! exactly once, passing no arguments. The worker's identity travels through the
//! environment; the core never parses the workload's output or manages its
//! execution beyond collecting the exit status.

use crate::coordinator::WorkerContext;
use crate::Result;
use anyhow::Context;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// This worker's assigned number
pub const ENV_WORKER_NUMBER: &str = "WORKER_NUMBER";
/// Declared size of the worker group
pub const ENV_NUMBER_OF_WORKERS: &str = "NUMBER_OF_WORKERS";
/// Shared scratch directory holding the seeded barrier slots
pub const ENV_TMP_PATH: &str = "TMP_PATH";

/// Invoke the workload executable with the worker's identity in its environment
pub fn hand_off(exec: &Path, ctx: &WorkerContext) -> Result<ExitStatus> {
    Command::new(exec)
        .env(ENV_WORKER_NUMBER, ctx.ordinal.to_string())
        .env(ENV_NUMBER_OF_WORKERS, ctx.workers.to_string())
        .env(ENV_TMP_PATH, &ctx.scratch)
        .status()
        .with_context(|| format!("Failed to launch workload {}", exec.display()))
}
