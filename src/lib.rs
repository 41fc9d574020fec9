//! Lockstep - File-lock based rendezvous for cooperating worker processes
//!
//! Lockstep coordinates a fixed-size group of independent OS processes launched
//! concurrently on a shared filesystem. Each process claims a unique worker number,
//! exactly one self-elects as leader, and all processes rendezvous at a barrier
//! before handing off to a downstream workload executable. The only communication
//! channel is a shared scratch directory protected by whole-file advisory locks -
//! no sockets, no central coordinator process, no shared memory.
//!
//! # Architecture
//!
//! - **Locked counter file**: advisory `flock(2)` serializes worker number assignment
//! - **Registration barrier**: polling rendezvous over the shared counter, bounded by timeout
//! - **Leader election**: whichever process wins the initial lock race gets worker #0
//! - **Barrier slot seeding**: the leader zeroes per-worker slot files for the workload
//! - **Handoff**: worker identity exported to the downstream workload via environment

pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod sync;
pub mod workload;

// Re-export commonly used types
pub use coordinator::{Role, WorkerContext};
pub use error::CoordError;

/// Result type used for peripheral glue throughout lockstep
///
/// Coordination primitives return [`CoordError`] directly; everything at the
/// binary boundary flows through this alias.
pub type Result<T> = anyhow::Result<T>;
