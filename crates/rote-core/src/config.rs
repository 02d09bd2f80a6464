//! Scheduler configuration.
//!
//! Everything here round-trips through serde so a hosting application can
//! persist overrides.

use serde::{Deserialize, Serialize};

/// Due-queue construction parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueConfig {
    /// Upper bound on the number of items handed to one sitting.
    pub max_items: usize,
    /// Retention threshold below which an item becomes due early, before
    /// its nominal review date.
    pub aggressiveness: f64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_items: 20,
            aggressiveness: 0.8,
        }
    }
}

/// Engine-wide tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// Queue construction parameters.
    pub queue: QueueConfig,
    /// Move a lapsed item (quality < 3) to the back of the working queue of
    /// the active sitting. Off by default: a lapsed item then drops out of
    /// the sitting until the next queue refresh.
    pub requeue_lapses: bool,
    /// Fraction of the remaining gap to full strength that a perfect recall
    /// closes.
    pub strength_gain: f64,
    /// Multiplier applied to strength on a lapse.
    pub lapse_strength_factor: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            requeue_lapses: false,
            strength_gain: 0.2,
            lapse_strength_factor: 0.5,
        }
    }
}
