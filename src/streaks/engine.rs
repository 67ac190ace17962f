use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::frequency::Frequency;
use super::period::PeriodKey;
use crate::models::completion::CompletionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Completed periods derived from a habit's log, as seen from one "today".
#[derive(Debug, Clone)]
pub struct CompletedPeriods {
    periods: BTreeSet<PeriodKey>,
    today: NaiveDate,
    today_period: Option<PeriodKey>,
    today_marked_incomplete: bool,
    skipped_future: usize,
}

impl CompletedPeriods {
    pub fn contains(&self, key: PeriodKey) -> bool {
        self.periods.contains(&key)
    }

    /// Number of distinct completed periods up to today.
    pub fn count(&self) -> usize {
        self.periods.len()
    }

    pub fn today_period(&self) -> Option<PeriodKey> {
        self.today_period
    }

    pub fn today_completed(&self) -> bool {
        self.today_period.is_some_and(|key| self.contains(key))
    }

    /// Today's calendar day carries an explicit `completed == false` record
    /// and today's period has no completed record.
    pub fn today_marked_incomplete(&self) -> bool {
        self.today_marked_incomplete && !self.today_completed()
    }

    pub fn skipped_future(&self) -> usize {
        self.skipped_future
    }

    pub fn last_completed(&self) -> Option<PeriodKey> {
        self.periods.last().copied()
    }
}

/// Computes current and best streaks for one frequency. Stateless, so a single
/// engine may be shared freely between callers.
#[derive(Debug, Clone, Copy)]
pub struct StreakEngine {
    frequency: Frequency,
}

impl StreakEngine {
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn completed_periods(
        &self,
        logs: &[CompletionRecord],
        now: DateTime<Utc>,
    ) -> CompletedPeriods {
        let today = now.date_naive();
        let today_period = self.frequency.period_of(today);
        let mut periods = BTreeSet::new();
        let mut today_marked_incomplete = false;
        let mut skipped_future = 0;

        for record in logs {
            let day = record.day();
            if day > today {
                skipped_future += 1;
                continue;
            }
            let Some(key) = self.frequency.period_of(day) else {
                continue;
            };
            if record.completed {
                periods.insert(key);
            } else if day == today {
                today_marked_incomplete = true;
            }
        }

        CompletedPeriods {
            periods,
            today,
            today_period,
            today_marked_incomplete,
            skipped_future,
        }
    }

    pub fn compute(&self, logs: &[CompletionRecord], now: DateTime<Utc>) -> StreakResult {
        let completed = self.completed_periods(logs, now);
        let result = self.evaluate(&completed);

        tracing::debug!(
            frequency = %self.frequency,
            current_streak = result.current_streak,
            best_streak = result.best_streak,
            records = logs.len(),
            skipped_future = completed.skipped_future(),
            "Computed streak"
        );

        result
    }

    pub fn evaluate(&self, completed: &CompletedPeriods) -> StreakResult {
        let current_streak = self.current_streak(completed);
        let best_streak = self.best_streak(completed).max(current_streak);
        StreakResult {
            current_streak,
            best_streak,
        }
    }

    /// Run of completed periods before today's, plus one if today's period is
    /// already completed. An open today never zeroes the streak; a today that
    /// was explicitly unchecked does.
    pub fn current_streak(&self, completed: &CompletedPeriods) -> u32 {
        if completed.today_marked_incomplete() {
            return 0;
        }
        let mut prior_run = 0u32;
        let mut cursor = self.frequency.period_preceding(completed.today);
        while let Some(key) = cursor {
            if !completed.contains(key) {
                break;
            }
            prior_run += 1;
            cursor = self.frequency.previous(key);
        }
        prior_run + u32::from(completed.today_completed())
    }

    /// Longest run of adjacent completed periods anywhere in the history.
    pub fn best_streak(&self, completed: &CompletedPeriods) -> u32 {
        let mut best = 0u32;
        let mut run = 0u32;
        let mut later: Option<PeriodKey> = None;

        for &key in completed.periods.iter().rev() {
            run = match later {
                Some(next) if self.frequency.previous(next) == Some(key) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            later = Some(key);
        }

        best
    }
}
