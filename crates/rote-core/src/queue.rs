//! Due-queue construction.
//!
//! An item competes for review attention when its nominal date has passed
//! OR the forgetting curve predicts recall has already dropped below the
//! configured threshold. Both criteria stand: the early trigger pulls
//! low-strength items in regardless of their scheduled date.

use chrono::{DateTime, Utc};

use crate::config::QueueConfig;
use crate::progress::ProgressEntry;
use crate::retention::estimate_retention;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Builds the bounded, priority-ordered list of due item keys.
#[derive(Debug, Clone, Default)]
pub struct DueQueueBuilder {
    config: QueueConfig,
}

impl DueQueueBuilder {
    /// Builder with the given queue parameters.
    pub fn new(config: QueueConfig) -> Self {
        Self { config }
    }

    /// Whether an entry is eligible for review at `now`: nominally due, or
    /// predicted retention below the aggressiveness threshold.
    pub fn is_eligible(&self, entry: &ProgressEntry, now: DateTime<Utc>) -> bool {
        if entry.is_due(now) {
            return true;
        }
        let retention = estimate_retention(entry.hours_since_review(now), entry.strength);
        retention < self.config.aggressiveness
    }

    /// Priority score used to rank eligible entries; highest reviews first.
    ///
    /// Weighted sum of overdue days, inverse strength and inverse easiness.
    pub fn priority_score(entry: &ProgressEntry, now: DateTime<Utc>) -> f64 {
        let overdue_ms = (now - entry.next_review).num_milliseconds();
        let days_overdue = (overdue_ms as f64 / MS_PER_DAY).max(0.0);
        days_overdue * 10.0 + (1.0 - entry.strength) * 5.0 + (2.5 - entry.efactor) * 3.0
    }

    /// Build the queue: filter eligible entries, rank descending by score,
    /// truncate to the configured bound.
    ///
    /// Equal scores order by ascending item key, so rebuilding from the same
    /// state always yields the same queue.
    pub fn build(&self, entries: &[ProgressEntry], now: DateTime<Utc>) -> Vec<String> {
        let mut eligible: Vec<(f64, &str)> = entries
            .iter()
            .filter(|e| self.is_eligible(e, now))
            .map(|e| (Self::priority_score(e, now), e.item_key.as_str()))
            .collect();

        let eligible_count = eligible.len();

        eligible.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        eligible.truncate(self.config.max_items);

        tracing::debug!(
            eligible = eligible_count,
            queued = eligible.len(),
            "Built due queue"
        );

        eligible
            .into_iter()
            .map(|(_, key)| key.to_string())
            .collect()
    }
}
