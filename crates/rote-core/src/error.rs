//! Error types for the scheduling engine.

use crate::store::StoreError;

/// Errors surfaced by the scheduling engine.
///
/// Storage failures propagate unmodified; the engine performs no retries and
/// leaves no partially recorded outcome behind.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Quality rating outside the integer range 0-5
    #[error("Invalid quality rating {0}: expected an integer in 0..=5")]
    InvalidQualityRating(i32),
    /// An outcome was recorded while no review session was active
    #[error("No active review session")]
    SessionNotActive,
    /// Repository failure
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Scheduler result type
pub type Result<T> = std::result::Result<T, SchedulerError>;
