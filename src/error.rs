//! Coordination error taxonomy
//!
//! Every failure here is fatal for the process that hits it. Failures are
//! local-only: a failing worker never notifies its peers, which discover the
//! problem through their own barrier timeouts.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the coordination core
#[derive(Debug, Error)]
pub enum CoordError {
    /// More registrants showed up than the declared worker count.
    ///
    /// Usually a stale counter file left behind by a crashed round; the scratch
    /// directory must be cleaned up externally before the next round.
    #[error(
        "assigned worker number {ordinal} but only {workers} workers declared; \
         stale counter file at {path}?"
    )]
    TooManyRegistrants {
        ordinal: u64,
        workers: u64,
        path: PathBuf,
    },

    /// The registration barrier never filled within the configured bound.
    #[error(
        "timed out after {waited:?} waiting for {expected} workers to register \
         (last observed {observed})"
    )]
    BarrierTimeout {
        waited: Duration,
        observed: u64,
        expected: u64,
    },

    /// A follower's barrier slot was never seeded by the leader.
    #[error("timed out after {waited:?} waiting for barrier slot {path} to be seeded")]
    SeedTimeout { path: PathBuf, waited: Duration },

    /// The counter file holds something other than an integer.
    #[error("counter file {path} holds non-integer content {content:?}")]
    CorruptCounter { path: PathBuf, content: String },

    /// Filesystem operation failed.
    #[error("{op} failed for {path}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoordError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}
