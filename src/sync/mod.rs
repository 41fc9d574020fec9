//! Filesystem synchronization primitives
//!
//! Everything the coordination core needs to rendezvous over a shared directory:
//! an advisory whole-file lock, a locked counter file for worker number
//! assignment, a polling registration barrier, and the on-disk scratch layout.
//!
//! The lock is only ever held across a single read-modify-write of the counter,
//! never across a barrier wait - holding it through the poll loop would deadlock
//! every other registrant permanently.

pub mod barrier;
pub mod counter;
pub mod flock;
pub mod layout;

pub use barrier::RegistrationBarrier;
pub use counter::CounterFile;
pub use flock::{LockFile, LockGuard};
pub use layout::ScratchLayout;
