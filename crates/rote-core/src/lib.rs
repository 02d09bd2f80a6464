//! # Rote Core
//!
//! Review scheduling engine for memorized text. Decides when each item
//! should next be reviewed and in what order items compete for review
//! attention today:
//!
//! - **SM-2 intervals**: quality-rated outcomes (0-5) drive the classic
//!   1 day / 6 days / `interval * efactor` ladder
//! - **Forgetting curve**: an exponential retention model pulls weak items
//!   into the queue before their nominal date
//! - **Priority due queue**: overdue days, inverse strength and inverse
//!   easiness rank the sitting, bounded to a configurable size
//! - **Review sessions**: a small state machine for one sitting, with a
//!   summary for the hosting product
//! - **Progress stores**: in-memory or SQLite-backed persistence of the
//!   per-item scheduling state
//!
//! The engine is deliberately narrow: how a quality rating is measured
//! (speech matching, typed recall, self-assessment) and how the queue is
//! presented are the hosting product's concern. The engine takes ratings in
//! and hands queues and progress snapshots out.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rote_core::{InMemoryProgressStore, ReviewSession, Scheduler};
//!
//! let scheduler = Scheduler::new(InMemoryProgressStore::new());
//! scheduler.initialize("psalm-23-1")?;
//!
//! let mut session = ReviewSession::new(&scheduler);
//! session.start()?;
//! while let Some(item) = session.next_item() {
//!     // practice happens outside the engine; it hands back a 0-5 rating
//!     session.record_outcome(&item, 4)?;
//! }
//! session.end();
//! println!("{:?}", session.summary());
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): compile SQLite into the binary via rusqlite

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod error;
pub mod progress;
pub mod queue;
pub mod retention;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Configuration
pub use config::{QueueConfig, SchedulerConfig};

// Errors
pub use error::{Result, SchedulerError};

// Progress model
pub use progress::{Mistake, ProgressEntry, ProgressStats};

// Queue construction
pub use queue::DueQueueBuilder;

// Retention estimation
pub use retention::estimate_retention;

// Scheduler facade
pub use scheduler::Scheduler;

// Sessions
pub use session::{ReviewSession, SessionState, SessionSummary};

// SM-2 algorithm
pub use sm2::{
    next_schedule, preview_intervals, Quality, SchedulingUpdate, INITIAL_EFACTOR, MIN_EFACTOR,
};

// Storage layer
pub use store::{InMemoryProgressStore, ProgressRepository, SqliteProgressStore, StoreError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        InMemoryProgressStore, ProgressEntry, ProgressRepository, ProgressStats, Quality, Result,
        ReviewSession, Scheduler, SchedulerConfig, SchedulerError, SessionSummary,
        SqliteProgressStore,
    };
}
