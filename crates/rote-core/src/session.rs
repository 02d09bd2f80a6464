//! Review session state machine.
//!
//! One sitting of review: snapshot the due queue, feed items to the caller,
//! record outcomes through the scheduler, report a summary. Sessions are
//! ephemeral; abandoning one never rolls back recorded outcomes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::progress::ProgressEntry;
use crate::scheduler::Scheduler;
use crate::store::ProgressRepository;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No sitting in progress; the initial state.
    Idle,
    /// A sitting is in progress.
    Active,
    /// The last sitting ended; its summary is still available.
    Complete,
}

/// Summary of one sitting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Item keys touched this sitting, in recording order.
    pub reviewed: Vec<String>,
    /// Outcomes with quality >= 3.
    pub correct: usize,
    /// Outcomes with quality < 3.
    pub lapses: usize,
}

/// One review sitting bound to a scheduler.
pub struct ReviewSession<'a, R: ProgressRepository> {
    scheduler: &'a Scheduler<R>,
    id: Uuid,
    state: SessionState,
    queue: VecDeque<String>,
    current_item: Option<String>,
    summary: SessionSummary,
}

impl<'a, R: ProgressRepository> ReviewSession<'a, R> {
    /// New idle session.
    pub fn new(scheduler: &'a Scheduler<R>) -> Self {
        Self {
            scheduler,
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            queue: VecDeque::new(),
            current_item: None,
            summary: SessionSummary::default(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a sitting is in progress.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Items left in the working queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// The item most recently pulled with [`next_item`](Self::next_item).
    pub fn current_item(&self) -> Option<&str> {
        self.current_item.as_deref()
    }

    /// Begin a sitting: rebuild the working queue and clear the summary.
    ///
    /// Returns the queue length. Starting with an empty due queue succeeds
    /// and yields a zero-item sitting; calling while already active
    /// refreshes the queue the same way.
    pub fn start(&mut self) -> Result<usize> {
        let keys = self.scheduler.due_queue(None)?;
        self.queue = keys.into();
        self.current_item = None;
        self.summary = SessionSummary::default();
        self.state = SessionState::Active;

        tracing::info!(
            session = %self.id,
            items = self.queue.len(),
            "Review session started"
        );
        Ok(self.queue.len())
    }

    /// Pull the next item of the sitting, if any.
    pub fn next_item(&mut self) -> Option<String> {
        if self.state != SessionState::Active {
            return None;
        }
        self.current_item = self.queue.pop_front();
        self.current_item.clone()
    }

    /// Record one outcome within the active sitting.
    ///
    /// Fails with [`SchedulerError::SessionNotActive`] outside an active
    /// sitting. Quality >= 4 drops the item from the remaining queue; a
    /// lapse moves it to the back only when `requeue_lapses` is configured.
    pub fn record_outcome(&mut self, item_key: &str, quality: i32) -> Result<ProgressEntry> {
        if self.state != SessionState::Active {
            return Err(SchedulerError::SessionNotActive);
        }

        let entry = self.scheduler.report_outcome(item_key, quality)?;

        // The rating was validated by report_outcome above
        self.summary.reviewed.push(item_key.to_string());
        if quality >= 3 {
            self.summary.correct += 1;
        } else {
            self.summary.lapses += 1;
        }

        if quality >= 4 {
            self.queue.retain(|k| k != item_key);
            if self.current_item.as_deref() == Some(item_key) {
                self.current_item = None;
            }
        } else if quality < 3 && self.scheduler.config().requeue_lapses {
            self.queue.retain(|k| k != item_key);
            self.queue.push_back(item_key.to_string());
        }

        Ok(entry)
    }

    /// End the sitting. A no-op unless active. The summary survives until
    /// the next [`start`](Self::start).
    pub fn end(&mut self) {
        if self.state != SessionState::Active {
            return;
        }
        self.queue.clear();
        self.current_item = None;
        self.state = SessionState::Complete;

        tracing::info!(
            session = %self.id,
            reviewed = self.summary.reviewed.len(),
            "Review session ended"
        );
    }

    /// Summary of the current or most recent sitting.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}
