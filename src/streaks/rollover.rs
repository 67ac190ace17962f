use chrono::{DateTime, Utc};
use serde::Serialize;

use super::accumulate::StoredStreak;
use super::engine::StreakEngine;
use super::period::PeriodKey;
use crate::models::completion::CompletionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RolloverOutcome {
    /// The period that just ended, if the schedule has one.
    pub closed_period: Option<PeriodKey>,
    pub satisfied: bool,
    pub stored: StoredStreak,
}

/// Whether `now` falls on the first day of a new period, i.e. the day a
/// scheduled rollover should evaluate the period that just closed.
pub fn is_rollover_due(engine: &StreakEngine, now: DateTime<Utc>) -> bool {
    engine.frequency().starts_period(now.date_naive())
}

/// Evaluate the period that just closed and fold the result into `stored`.
/// Uses the same engine as interactive toggles so both paths agree on
/// period boundaries.
pub fn rollover(
    engine: &StreakEngine,
    logs: &[CompletionRecord],
    now: DateTime<Utc>,
    stored: StoredStreak,
) -> RolloverOutcome {
    let completed = engine.completed_periods(logs, now);
    let closed_period = engine.frequency().period_preceding(now.date_naive());
    let satisfied = closed_period.is_some_and(|key| completed.contains(key));
    let stored = stored.accumulate(engine.evaluate(&completed));

    if satisfied {
        tracing::debug!(
            frequency = %engine.frequency(),
            current_streak = stored.current_streak,
            "Rollover: period satisfied"
        );
    } else {
        tracing::info!(
            frequency = %engine.frequency(),
            closed_period = ?closed_period,
            best_streak = stored.best_streak,
            "Rollover: period missed, streak reset"
        );
    }

    RolloverOutcome {
        closed_period,
        satisfied,
        stored,
    }
}
