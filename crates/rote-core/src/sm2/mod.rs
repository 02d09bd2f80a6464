//! SM-2 Interval Calculation
//!
//! SuperMemo-2 scheduling: every practice outcome carries a quality rating
//! 0-5, and the algorithm derives the next interval, the repetition streak
//! and the easiness factor from it.
//!
//! Quality scale:
//! - 0: complete blackout, no recall
//! - 1: incorrect, recognized the text on seeing it
//! - 2: incorrect, but recall felt close
//! - 3: correct with serious difficulty
//! - 4: correct after hesitation
//! - 5: perfect recall
//!
//! Core update:
//! - EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3
//! - q < 3 resets the streak and forces a next-day review
//! - otherwise the interval walks the 1 day / 6 days / interval * EF' ladder

mod algorithm;

pub use algorithm::{
    next_schedule, preview_intervals, Quality, SchedulingUpdate, INITIAL_EFACTOR, MIN_EFACTOR,
};
