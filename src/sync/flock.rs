//! Advisory whole-file locking
//!
//! Thin RAII wrapper over `flock(2)`. `flock` locks are bound to the open file
//! description, so two lock attempts from the same process (on separate opens)
//! exclude each other just like attempts from different processes - which is what
//! lets the test suite simulate a process group with threads.

use crate::error::CoordError;
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// An advisory exclusive lock bound to a filesystem path
///
/// The lock file is created on first acquisition and never removed; its content
/// is irrelevant, only the `flock` state on it matters.
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the lock, blocking until it is available
    ///
    /// Returns a guard that releases the lock when dropped, so every exit path
    /// out of the caller releases it.
    pub fn lock(&self) -> Result<LockGuard, CoordError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| CoordError::io("open lock file", &self.path, e))?;

        let fd = file.as_raw_fd();
        loop {
            let result = unsafe { libc::flock(fd, libc::LOCK_EX) };
            if result == 0 {
                break;
            }
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return Err(CoordError::io("flock(LOCK_EX)", &self.path, err));
        }

        Ok(LockGuard { file })
    }
}

/// Guard for a held [`LockFile`] lock
///
/// Releasing on drop cannot report errors; closing the descriptor releases the
/// lock regardless, so the explicit `LOCK_UN` is only there to release promptly.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        unsafe {
            libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_acquire_release() {
        let temp_dir = TempDir::new().unwrap();
        let lock = LockFile::new(temp_dir.path().join("test.lock"));

        let guard = lock.lock().unwrap();
        drop(guard);

        // Re-acquirable after release
        let _guard = lock.lock().unwrap();
    }

    #[test]
    fn test_lock_file_created_on_first_acquire() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("created.lock");
        let lock = LockFile::new(&path);

        assert!(!path.exists());
        let _guard = lock.lock().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_lock_excludes_concurrent_holder() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("excl.lock");
        let released = Arc::new(AtomicBool::new(false));
        let (held_tx, held_rx) = mpsc::channel();

        let holder = {
            let path = path.clone();
            let released = Arc::clone(&released);
            thread::spawn(move || {
                let lock = LockFile::new(path);
                let guard = lock.lock().unwrap();
                held_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(100));
                released.store(true, Ordering::SeqCst);
                drop(guard);
            })
        };

        // Wait until the holder actually owns the lock, then contend for it.
        held_rx.recv().unwrap();
        let lock = LockFile::new(&path);
        let _guard = lock.lock().unwrap();
        assert!(
            released.load(Ordering::SeqCst),
            "lock acquired while another holder still owned it"
        );

        holder.join().unwrap();
    }
}
