//! Leader-side barrier slot seeding
//!
//! The downstream workload runs its own finer-grained barrier over per-worker
//! slot files in the scratch directory. The leader seeds those slots - one
//! fixed-size zeroed file per worker - before any process hands off; the core's
//! responsibility ends at seeding, it never operates the second barrier.
//!
//! Followers cannot observe when the leader finishes except through the
//! filesystem, so they wait (bounded) for their own slot to appear.

use crate::error::CoordError;
use crate::sync::barrier;
use crate::sync::layout::ScratchLayout;
use std::fs;
use std::time::Duration;

/// Size of one barrier slot: a single zeroed u64 counter
pub const BARRIER_SLOT_LEN: usize = 8;

/// Create one zeroed slot file per worker
///
/// Leader-only. Any I/O error is fatal before handoff: a partially seeded set
/// of slots would strand followers at the workload's barrier indefinitely.
pub fn seed_barrier_slots(layout: &ScratchLayout, workers: u64) -> Result<(), CoordError> {
    for ordinal in 0..workers {
        let path = layout.barrier_slot(ordinal);
        fs::write(&path, [0u8; BARRIER_SLOT_LEN])
            .map_err(|e| CoordError::io("seed barrier slot", &path, e))?;
    }
    Ok(())
}

/// Wait for this follower's slot to be seeded by the leader
pub fn await_barrier_slot(
    layout: &ScratchLayout,
    ordinal: u64,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), CoordError> {
    barrier::wait_for_file(
        &layout.barrier_slot(ordinal),
        BARRIER_SLOT_LEN as u64,
        timeout,
        poll_interval,
    )
}
