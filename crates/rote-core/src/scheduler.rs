//! Scheduler facade.
//!
//! The external surface of the engine: outcome recording, queue refresh and
//! progress snapshots, backed by any [`ProgressRepository`]. Outcome
//! recording is the single mutating entry point; it runs as one atomic
//! read-modify-write per item key.

use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::progress::{Mistake, ProgressEntry, ProgressStats};
use crate::queue::DueQueueBuilder;
use crate::sm2::{next_schedule, preview_intervals, Quality};
use crate::store::{ProgressRepository, StoreError};

/// Review scheduler over a progress repository.
pub struct Scheduler<R: ProgressRepository> {
    repo: R,
    config: SchedulerConfig,
    /// Serializes the read-compute-write span of outcome recording so two
    /// racing recordings for the same item cannot lose updates.
    write_lock: Mutex<()>,
}

impl<R: ProgressRepository> Scheduler<R> {
    /// Scheduler with default configuration.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, SchedulerConfig::default())
    }

    /// Scheduler with explicit configuration.
    pub fn with_config(repo: R, config: SchedulerConfig) -> Self {
        Self {
            repo,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Record one practice outcome for an item.
    ///
    /// Validates the quality rating before touching any state, then applies
    /// the SM-2 update, the strength rule and the mistake log, and persists
    /// the whole entry. Either the computed entry is fully persisted or the
    /// call fails; there is no partial write.
    pub fn report_outcome(&self, item_key: &str, quality: i32) -> Result<ProgressEntry> {
        let quality =
            Quality::from_i32(quality).ok_or(SchedulerError::InvalidQualityRating(quality))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Init("Write lock poisoned".into()))?;

        let now = Utc::now();
        let mut entry = match self.repo.get(item_key)? {
            Some(existing) => existing,
            None => ProgressEntry::new(item_key, now),
        };

        let update = next_schedule(
            quality,
            entry.consecutive_correct,
            entry.efactor,
            entry.interval,
        );

        entry.efactor = update.efactor;
        entry.interval = update.interval;
        entry.consecutive_correct = update.repetitions;
        entry.total_reviews += 1;

        if quality.is_passing() {
            let quality_norm = (quality.value() as f64 - 2.0) / 3.0;
            entry.strength = (entry.strength
                + self.config.strength_gain * quality_norm * (1.0 - entry.strength))
                .clamp(0.0, 1.0);
        } else {
            entry.strength = (entry.strength * self.config.lapse_strength_factor).clamp(0.0, 1.0);
            entry.mistakes.push(Mistake {
                quality: quality.value(),
                recorded_at: now,
            });
        }

        entry.last_reviewed = now;
        entry.next_review = now + Duration::days(entry.interval as i64);

        self.repo.upsert(&entry)?;

        tracing::debug!(
            item = item_key,
            quality = quality.value(),
            interval = entry.interval,
            efactor = entry.efactor,
            strength = entry.strength,
            "Recorded outcome"
        );

        Ok(entry)
    }

    /// Current due queue, bounded by `max_items` when given, otherwise by
    /// the configured queue bound.
    pub fn due_queue(&self, max_items: Option<usize>) -> Result<Vec<String>> {
        let mut queue_config = self.config.queue;
        if let Some(max) = max_items {
            queue_config.max_items = max;
        }

        let entries = self.repo.all()?;
        Ok(DueQueueBuilder::new(queue_config).build(&entries, Utc::now()))
    }

    /// Progress snapshot for one item.
    pub fn progress(&self, item_key: &str) -> Result<Option<ProgressEntry>> {
        Ok(self.repo.get(item_key)?)
    }

    /// All tracked progress entries.
    pub fn all_progress(&self) -> Result<Vec<ProgressEntry>> {
        Ok(self.repo.all()?)
    }

    /// Ensure an item is tracked; a no-op for items already present.
    pub fn initialize(&self, item_key: &str) -> Result<ProgressEntry> {
        Ok(self.repo.initialize(item_key)?)
    }

    /// Interval each quality rating would produce for an item. Untracked
    /// items are previewed from the default state without being persisted.
    pub fn preview(&self, item_key: &str) -> Result<[i32; 6]> {
        let entry = match self.repo.get(item_key)? {
            Some(existing) => existing,
            None => ProgressEntry::new(item_key, Utc::now()),
        };
        Ok(preview_intervals(
            entry.consecutive_correct,
            entry.efactor,
            entry.interval,
        ))
    }

    /// Aggregate statistics over all tracked items.
    pub fn stats(&self) -> Result<ProgressStats> {
        let entries = self.repo.all()?;
        let total = entries.len() as i64;
        if total == 0 {
            return Ok(ProgressStats::default());
        }

        let now = Utc::now();
        let due = entries.iter().filter(|e| e.is_due(now)).count() as i64;
        let average_strength = entries.iter().map(|e| e.strength).sum::<f64>() / total as f64;
        let average_efactor = entries.iter().map(|e| e.efactor).sum::<f64>() / total as f64;
        let total_reviews = entries.iter().map(|e| e.total_reviews as i64).sum();

        Ok(ProgressStats {
            total_items: total,
            items_due: due,
            average_strength,
            average_efactor,
            total_reviews,
        })
    }

    /// Serialize the full progress map as JSON, ordered by item key.
    pub fn export_json(&self) -> Result<String> {
        let mut entries = self.repo.all()?;
        entries.sort_by(|a, b| a.item_key.cmp(&b.item_key));
        Ok(serde_json::to_string_pretty(&entries).map_err(StoreError::from)?)
    }

    /// Import a progress map previously produced by [`export_json`].
    ///
    /// Returns the number of imported entries. Existing entries with the
    /// same keys are replaced.
    ///
    /// [`export_json`]: Scheduler::export_json
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let entries: Vec<ProgressEntry> =
            serde_json::from_str(json).map_err(StoreError::from)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Init("Write lock poisoned".into()))?;
        for entry in &entries {
            self.repo.upsert(entry)?;
        }
        Ok(entries.len())
    }
}
