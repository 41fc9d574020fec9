//! Locked counter file
//!
//! The counter file holds one integer: the number of worker ordinals assigned so
//! far. It is created by the first registrant and incremented by every later one,
//! always under the lock. The first process to win the lock race observes the
//! file missing, writes `1`, and owns ordinal 0 - lock-acquisition order is the
//! total order on ordinals.
//!
//! The file is never deleted by the core; a counter left behind by a crashed
//! round must be cleaned up externally before the next one.

use crate::error::CoordError;
use crate::sync::flock::LockFile;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Shared counter file protected by an advisory lock
#[derive(Debug, Clone)]
pub struct CounterFile {
    path: PathBuf,
    lock: LockFile,
}

impl CounterFile {
    pub fn new(path: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: LockFile::new(lock_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Claim the next worker ordinal
    ///
    /// Must be called exactly once per process per round; a second call claims a
    /// second ordinal and corrupts the round. Under the lock: if the counter file
    /// does not exist yet, create it holding `1` and claim ordinal 0; otherwise
    /// read the current value `v`, overwrite the file with `v + 1` (truncating any
    /// longer previous content), and claim `v`.
    pub fn claim_next(&self) -> Result<u64, CoordError> {
        let _guard = self.lock.lock()?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                // First registrant: next worker gets 1.
                file.write_all(b"1")
                    .map_err(|e| CoordError::io("write counter file", &self.path, e))?;
                Ok(0)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let current = self.read_value()?;
                fs::write(&self.path, (current + 1).to_string())
                    .map_err(|e| CoordError::io("write counter file", &self.path, e))?;
                Ok(current)
            }
            Err(e) => Err(CoordError::io("create counter file", &self.path, e)),
        }
    }

    /// Read the number of ordinals assigned so far
    ///
    /// Takes the lock for the duration of the read. The lock is cheap and a
    /// locked read never observes a torn write; a missing file reads as zero
    /// (nobody has registered yet).
    pub fn read(&self) -> Result<u64, CoordError> {
        let _guard = self.lock.lock()?;
        self.read_value()
    }

    fn read_value(&self) -> Result<u64, CoordError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CoordError::io("read counter file", &self.path, e)),
        };

        content
            .trim()
            .parse()
            .map_err(|_| CoordError::CorruptCounter {
                path: self.path.clone(),
                content: content.trim().to_string(),
            })
    }
}
