//! SM-2 scheduling algorithm.

use serde::{Deserialize, Serialize};

/// Minimum easiness factor.
pub const MIN_EFACTOR: f64 = 1.3;

/// Easiness factor assigned to a freshly initialized item.
pub const INITIAL_EFACTOR: f64 = 2.5;

/// A validated quality rating in 0..=5.
///
/// Construction goes through [`Quality::from_i32`] so an out-of-range rating
/// is rejected before any scheduling state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    /// Validate an integer rating. Returns `None` outside 0..=5.
    pub fn from_i32(value: i32) -> Option<Self> {
        if (0..=5).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Raw rating value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Quality 3 and above counts as a successful recall.
    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }

    /// Quality 4 and above is confident enough that the item does not need
    /// to be shown again within the same sitting.
    pub fn is_confident(self) -> bool {
        self.0 >= 4
    }
}

/// Updated scheduling parameters produced by [`next_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingUpdate {
    /// Days until the next scheduled review.
    pub interval: i32,
    /// Consecutive successful repetitions after this outcome.
    pub repetitions: i32,
    /// Updated easiness factor, never below [`MIN_EFACTOR`].
    pub efactor: f64,
}

/// Compute the next scheduling parameters for one recorded outcome.
///
/// Deterministic and side-effect free. The easiness factor is updated for
/// every outcome and floored at [`MIN_EFACTOR`]; a failing quality (< 3)
/// resets the repetition streak and forces a review the next day.
pub fn next_schedule(
    quality: Quality,
    repetitions: i32,
    efactor: f64,
    interval: i32,
) -> SchedulingUpdate {
    let miss = (5 - quality.value()) as f64;
    let efactor = (efactor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EFACTOR);

    if !quality.is_passing() {
        return SchedulingUpdate {
            interval: 1,
            repetitions: 0,
            efactor,
        };
    }

    let repetitions = repetitions + 1;
    let interval = match repetitions {
        1 => 1,
        2 => 6,
        _ => (interval as f64 * efactor).round() as i32,
    };

    SchedulingUpdate {
        interval,
        repetitions,
        efactor,
    }
}

/// Interval each quality rating 0..=5 would produce from the given state.
///
/// Index `q` holds the interval for quality `q`. Lets a UI show the learner
/// what each rating means before one is committed.
pub fn preview_intervals(repetitions: i32, efactor: f64, interval: i32) -> [i32; 6] {
    let mut out = [0; 6];
    for (q, slot) in out.iter_mut().enumerate() {
        *slot = next_schedule(Quality(q as u8), repetitions, efactor, interval).interval;
    }
    out
}
