//! Scratch directory layout
//!
//! All coordination state for one round lives in a scratch subdirectory of the
//! shared output directory. The layout is fixed so that every worker, and the
//! downstream workload, derives the same paths independently:
//!
//! - `worker_num_sync` + `worker_num_sync.lock` - the counter file and its lock
//! - `barrier<i>` - per-worker 8-byte slot files seeded by the leader
//! - `worker_state` + `worker_state.lock` - reserved for coordinator state
//!
//! The reserved state file is never touched by the core; it is an extension
//! point for coordinator failure detection, not a feature.

use crate::error::CoordError;
use crate::sync::counter::CounterFile;
use crate::sync::flock::LockFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the scratch subdirectory under the output directory
pub const SCRATCH_DIR_NAME: &str = "tmp";

/// Paths of one coordination round's shared state
#[derive(Debug, Clone)]
pub struct ScratchLayout {
    root: PathBuf,
}

impl ScratchLayout {
    /// Layout rooted at `<output_dir>/tmp`
    pub fn under(output_dir: &Path) -> Self {
        Self {
            root: output_dir.join(SCRATCH_DIR_NAME),
        }
    }

    /// Layout rooted directly at `root` (tests, non-standard deployments)
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the scratch directory, tolerating concurrent creation
    ///
    /// Every worker calls this; `create_dir_all` makes "already exists" a
    /// success regardless of which worker got there first.
    pub fn ensure(&self) -> Result<(), CoordError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| CoordError::io("create scratch directory", &self.root, e))
    }

    pub fn counter_path(&self) -> PathBuf {
        self.root.join("worker_num_sync")
    }

    pub fn counter_lock_path(&self) -> PathBuf {
        self.root.join("worker_num_sync.lock")
    }

    /// The counter file for this round
    pub fn counter(&self) -> CounterFile {
        CounterFile::new(self.counter_path(), self.counter_lock_path())
    }

    /// Per-worker barrier slot file seeded by the leader
    pub fn barrier_slot(&self, ordinal: u64) -> PathBuf {
        self.root.join(format!("barrier{ordinal}"))
    }

    /// Reserved coordinator-state file; unused by the core
    pub fn state_path(&self) -> PathBuf {
        self.root.join("worker_state")
    }

    /// Lock for the reserved coordinator-state file; unused by the core
    pub fn state_lock(&self) -> LockFile {
        LockFile::new(self.root.join("worker_state.lock"))
    }
}
