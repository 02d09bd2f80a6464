//! Progress module - per-item memory model
//!
//! One [`ProgressEntry`] per memorized item, carrying the SM-2 scheduling
//! parameters, the heuristic strength used by the forgetting curve, and an
//! append-only log of low-quality outcomes.

mod entry;

pub use entry::{Mistake, ProgressEntry};

use serde::{Deserialize, Serialize};

/// Aggregate snapshot over all tracked items.
///
/// Derived on demand from the repository contents; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Number of tracked items.
    pub total_items: i64,
    /// Items whose nominal review date has passed.
    pub items_due: i64,
    /// Mean strength across all items.
    pub average_strength: f64,
    /// Mean easiness factor across all items.
    pub average_efactor: f64,
    /// Total recorded outcomes across all items.
    pub total_reviews: i64,
}
