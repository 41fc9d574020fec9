//! Registration barrier
//!
//! A polling rendezvous over the shared counter file: every worker blocks here
//! after claiming its ordinal until all declared participants have registered, or
//! until its own timeout expires. There is no notification channel between
//! processes, so the barrier re-reads the counter at a fixed interval; a stale
//! read of the monotonically increasing counter just costs one more iteration.
//!
//! Timeouts are local: each worker measures from its own entry into the wait,
//! not from any shared clock. A worker that times out aborts its round without
//! telling anyone - its peers hit their own timeouts.

use crate::error::CoordError;
use crate::sync::counter::CounterFile;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Default bound on any barrier wait
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default interval between counter polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Rendezvous barrier over a shared counter file
///
/// Reusable for any participant count and counter location; the registration
/// round is just one instantiation.
#[derive(Debug)]
pub struct RegistrationBarrier {
    counter: CounterFile,
    participants: u64,
    timeout: Duration,
    poll_interval: Duration,
}

impl RegistrationBarrier {
    pub fn new(
        counter: CounterFile,
        participants: u64,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            counter,
            participants,
            timeout,
            poll_interval,
        }
    }

    /// Block until all participants have registered
    ///
    /// Returns the instant the observed count reaches the participant count, or
    /// [`CoordError::BarrierTimeout`] once this worker's own wall-clock bound is
    /// exceeded. No retry, no backoff: a timeout means a peer failed, which
    /// cannot be remedied locally.
    pub fn wait(&self, ordinal: u64) -> Result<(), CoordError> {
        let start = Instant::now();

        loop {
            let observed = self.counter.read()?;
            if observed >= self.participants {
                return Ok(());
            }

            println!(
                "worker #{}: waiting at registration barrier ({}/{} registered)",
                ordinal, observed, self.participants
            );

            if start.elapsed() >= self.timeout {
                return Err(CoordError::BarrierTimeout {
                    waited: start.elapsed(),
                    observed,
                    expected: self.participants,
                });
            }

            thread::sleep(self.poll_interval);
        }
    }
}

/// Block until `path` exists with at least `expected_len` bytes
///
/// Used by followers to await the leader's barrier slot seeding. Same polling
/// and local-timeout contract as [`RegistrationBarrier::wait`].
pub fn wait_for_file(
    path: &Path,
    expected_len: u64,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), CoordError> {
    let start = Instant::now();

    loop {
        match fs::metadata(path) {
            Ok(meta) if meta.len() >= expected_len => return Ok(()),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(CoordError::io("stat barrier slot", path, e)),
        }

        if start.elapsed() >= timeout {
            return Err(CoordError::SeedTimeout {
                path: path.to_path_buf(),
                waited: start.elapsed(),
            });
        }

        thread::sleep(poll_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    const FAST_POLL: Duration = Duration::from_millis(20);

    fn counter_in(dir: &TempDir) -> CounterFile {
        CounterFile::new(
            dir.path().join("worker_num_sync"),
            dir.path().join("worker_num_sync.lock"),
        )
    }

    #[test]
    fn test_single_participant_passes_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let counter = counter_in(&temp_dir);
        assert_eq!(counter.claim_next().unwrap(), 0);

        let barrier = RegistrationBarrier::new(counter, 1, DEFAULT_TIMEOUT, FAST_POLL);
        barrier.wait(0).unwrap();
    }

    #[test]
    fn test_timeout_when_group_never_fills() {
        let temp_dir = TempDir::new().unwrap();
        let counter = counter_in(&temp_dir);
        assert_eq!(counter.claim_next().unwrap(), 0);

        let barrier =
            RegistrationBarrier::new(counter, 2, Duration::from_millis(150), FAST_POLL);
        let err = barrier.wait(0).unwrap_err();
        match err {
            CoordError::BarrierTimeout {
                observed, expected, ..
            } => {
                assert_eq!(observed, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("expected BarrierTimeout, got {other:?}"),
        }
    }

    #[test]
    fn test_barrier_blocks_until_last_registrant() {
        let temp_dir = TempDir::new().unwrap();
        let counter = counter_in(&temp_dir);

        // Two of three workers register.
        let first = counter.claim_next().unwrap();
        let second = counter.claim_next().unwrap();

        let passed = Arc::new(AtomicUsize::new(0));
        let waiters: Vec<_> = [first, second]
            .into_iter()
            .map(|ordinal| {
                let counter = counter.clone();
                let passed = Arc::clone(&passed);
                thread::spawn(move || {
                    let barrier =
                        RegistrationBarrier::new(counter, 3, Duration::from_secs(10), FAST_POLL);
                    barrier.wait(ordinal).unwrap();
                    passed.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        // With the group one short, nobody gets through.
        thread::sleep(Duration::from_millis(200));
        assert_eq!(passed.load(Ordering::SeqCst), 0);

        // The last registrant releases everyone.
        assert_eq!(counter.claim_next().unwrap(), 2);
        for waiter in waiters {
            waiter.join().unwrap();
        }
        assert_eq!(passed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_wait_for_file_sees_late_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barrier0");

        let writer = {
            let path = path.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(80));
                fs::write(path, [0u8; 8]).unwrap();
            })
        };

        wait_for_file(&path, 8, Duration::from_secs(5), FAST_POLL).unwrap();
        writer.join().unwrap();
    }

    #[test]
    fn test_wait_for_file_times_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barrier7");

        let err = wait_for_file(&path, 8, Duration::from_millis(100), FAST_POLL).unwrap_err();
        assert!(matches!(err, CoordError::SeedTimeout { .. }));
    }

    #[test]
    fn test_wait_for_file_ignores_short_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barrier1");
        fs::write(&path, [0u8; 3]).unwrap();

        let err = wait_for_file(&path, 8, Duration::from_millis(100), FAST_POLL).unwrap_err();
        assert!(matches!(err, CoordError::SeedTimeout { .. }));
    }
}
