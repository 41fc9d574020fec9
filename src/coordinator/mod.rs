//! Round orchestration
//!
//! This module ties the primitives together into one coordination round: claim a
//! worker number, validate it against the declared worker count, rendezvous at
//! the registration barrier, resolve the leader, and make sure the per-worker
//! barrier slots are seeded before anyone proceeds to the workload handoff.
//!
//! Each process runs [`Rendezvous::run`] exactly once. There is no cross-process
//! ordering guarantee beyond lock-acquisition order on the counter: whichever
//! process wins the initial race gets worker #0 and with it the leader role.

pub mod seed;

use crate::error::CoordError;
use crate::sync::barrier::RegistrationBarrier;
use crate::sync::layout::ScratchLayout;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Role derived from the assigned worker number
///
/// Pure derivation with no failure modes: worker #0 is the leader, everyone
/// else follows. Exactly one leader per round by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Follower,
}

impl Role {
    pub fn from_ordinal(ordinal: u64) -> Self {
        if ordinal == 0 {
            Self::Leader
        } else {
            Self::Follower
        }
    }

    pub fn is_leader(self) -> bool {
        self == Self::Leader
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leader => write!(f, "leader"),
            Self::Follower => write!(f, "follower"),
        }
    }
}

/// Identity handed to the downstream workload after coordination
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// Worker number in `0..workers`, unique within the round
    pub ordinal: u64,
    /// Declared size of the worker group
    pub workers: u64,
    /// Leader iff `ordinal == 0`
    pub role: Role,
    /// Shared scratch directory holding this round's coordination state
    pub scratch: PathBuf,
}

/// One coordination round from registration through barrier-slot seeding
#[derive(Debug)]
pub struct Rendezvous {
    layout: ScratchLayout,
    workers: u64,
    timeout: Duration,
    poll_interval: Duration,
}

impl Rendezvous {
    pub fn new(
        layout: ScratchLayout,
        workers: u64,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            layout,
            workers,
            timeout,
            poll_interval,
        }
    }

    /// Run the round, returning this process's identity
    ///
    /// Claims an ordinal under the counter lock, waits for the full group at the
    /// registration barrier, then seeds barrier slots (leader) or waits for its
    /// own slot to appear (follower). Any error is fatal for this process;
    /// peers only learn of it through their own timeouts.
    pub fn run(&self) -> Result<WorkerContext, CoordError> {
        self.layout.ensure()?;

        let counter = self.layout.counter();
        let ordinal = counter.claim_next()?;
        if ordinal == 0 {
            println!(
                "worker #0: counter file {} was absent, claiming leadership",
                counter.path().display()
            );
        } else {
            println!("worker #{ordinal}: registered");
        }

        // More registrants than declared workers means the launch configuration
        // and the counter disagree. Abort, never retry.
        if ordinal >= self.workers {
            return Err(CoordError::TooManyRegistrants {
                ordinal,
                workers: self.workers,
                path: counter.path().to_path_buf(),
            });
        }

        let barrier =
            RegistrationBarrier::new(counter, self.workers, self.timeout, self.poll_interval);
        barrier.wait(ordinal)?;

        let role = Role::from_ordinal(ordinal);
        match role {
            Role::Leader => seed::seed_barrier_slots(&self.layout, self.workers)?,
            Role::Follower => seed::await_barrier_slot(
                &self.layout,
                ordinal,
                self.timeout,
                self.poll_interval,
            )?,
        }

        Ok(WorkerContext {
            ordinal,
            workers: self.workers,
            role,
            scratch: self.layout.root().to_path_buf(),
        })
    }
}
