//! Streak calculation over habit-completion logs.
//!
//! Every caller (interactive toggles, display, scheduled rollover) goes
//! through [`StreakEngine`]; nothing else derives streak math.

pub mod accumulate;
pub mod engine;
pub mod frequency;
pub mod period;
pub mod rollover;
pub mod toggle;

pub use accumulate::StoredStreak;
pub use engine::{CompletedPeriods, StreakEngine, StreakResult};
pub use frequency::Frequency;
pub use period::{PeriodKey, WeekdaySet};
