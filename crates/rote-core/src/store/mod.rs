//! Store Module
//!
//! The repository owns the authoritative mapping from item key to
//! [`ProgressEntry`]. Two implementations ship with the crate: an in-memory
//! map for ephemeral use and tests, and a SQLite store with versioned
//! migrations for durable state.

mod memory;
mod migrations;
mod sqlite;

pub use memory::InMemoryProgressStore;
pub use migrations::MIGRATIONS;
pub use sqlite::SqliteProgressStore;

use chrono::Utc;

use crate::progress::ProgressEntry;

/// Store error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Authoritative mapping from item key to scheduling state.
///
/// Entries handed to [`upsert`](ProgressRepository::upsert) must come from
/// outcome recording or [`initialize`](ProgressRepository::initialize); the
/// invariants of the progress model depend on it. Durability is the
/// implementation's concern; failures propagate unmodified.
pub trait ProgressRepository: Send + Sync {
    /// Fetch the entry for an item, if one exists.
    fn get(&self, item_key: &str) -> Result<Option<ProgressEntry>>;

    /// Insert or replace the entry for `entry.item_key`.
    fn upsert(&self, entry: &ProgressEntry) -> Result<()>;

    /// All tracked entries. Iteration order is not significant.
    fn all(&self) -> Result<Vec<ProgressEntry>>;

    /// Return the existing entry, or create and persist the default one.
    fn initialize(&self, item_key: &str) -> Result<ProgressEntry> {
        if let Some(existing) = self.get(item_key)? {
            return Ok(existing);
        }
        let entry = ProgressEntry::new(item_key, Utc::now());
        self.upsert(&entry)?;
        Ok(entry)
    }
}
