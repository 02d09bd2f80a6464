//! Per-item progress entry with SM-2 scheduling state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sm2::INITIAL_EFACTOR;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// One recorded low-quality outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    /// The failing quality rating (0-2).
    pub quality: u8,
    /// When the outcome was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Scheduling state for one memorized item.
///
/// Mutated only through outcome recording or initialization; every update
/// maintains `next_review == last_reviewed + interval days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Opaque stable identifier supplied by the caller.
    pub item_key: String,
    /// Heuristic durability of the memory, in [0, 1].
    pub strength: f64,
    /// Timestamp of the most recent recorded outcome.
    pub last_reviewed: DateTime<Utc>,
    /// When the item next becomes nominally due.
    pub next_review: DateTime<Utc>,
    /// Total recorded outcomes.
    pub total_reviews: i32,
    /// Current streak of outcomes with quality >= 3.
    pub consecutive_correct: i32,
    /// SM-2 easiness factor, never below 1.3.
    pub efactor: f64,
    /// Days until the next scheduled review; 0 before any successful review.
    pub interval: i32,
    /// Append-only log of low-quality outcomes.
    #[serde(default)]
    pub mistakes: Vec<Mistake>,
}

impl ProgressEntry {
    /// Fresh entry for an item seen for the first time: immediately due,
    /// default easiness, no strength.
    pub fn new(item_key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            item_key: item_key.into(),
            strength: 0.0,
            last_reviewed: now,
            next_review: now,
            total_reviews: 0,
            consecutive_correct: 0,
            efactor: INITIAL_EFACTOR,
            interval: 0,
            mistakes: Vec::new(),
        }
    }

    /// Whether the item is nominally due at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review
    }

    /// Fractional hours elapsed since the last recorded outcome.
    pub fn hours_since_review(&self, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = (now - self.last_reviewed).num_milliseconds();
        (elapsed_ms as f64 / MS_PER_HOUR).max(0.0)
    }
}
