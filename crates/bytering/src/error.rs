//! Error surface for the ring engine.
//!
//! The engine distinguishes three runtime failure kinds — a bad acknowledge,
//! a record that cannot fit, and insufficient readable data — plus two
//! construction-time kinds. Partial transfers are never errors; they are
//! reported through byte counts.

use thiserror::Error;

/// Convenience result alias for fallible ring operations.
pub type RingResult<T> = Result<T, RingError>;

/// Errors surfaced by the ring engine.
#[derive(Debug, Error)]
pub enum RingError {
    /// Requested capacity is zero or exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    #[error("invalid ring capacity {requested}: must be between 1 and {maximum}")]
    InvalidCapacity { requested: usize, maximum: usize },

    /// Allocation of the backing region failed for the given size/alignment pair.
    #[error("failed to allocate ring storage of {size} bytes aligned to {alignment}")]
    AllocationFailed { size: usize, alignment: usize },

    /// An acknowledge asked to commit more bytes than the outstanding claim.
    #[error("acknowledge of {requested} bytes exceeds outstanding claim of {claimed}")]
    AckExceedsClaim { requested: usize, claimed: usize },

    /// An all-or-none write (transactional, framed, or overwrite) does not
    /// fit, or a framed item does not fit its destination buffer.
    #[error("{requested} bytes do not fit in the {available} available")]
    TooLarge { requested: usize, available: usize },

    /// An all-or-none read asked for more bytes than are committed.
    #[error("need {requested} bytes but only {available} are readable")]
    WouldBlock { requested: usize, available: usize },
}
