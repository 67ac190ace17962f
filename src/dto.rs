//! Request/response shapes for the streak endpoints.
//!
//! Every endpoint is stateless: the caller sends the habit's full log and,
//! where relevant, its stored streak values, and writes back what it receives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::completion::CompletionRecord;
use crate::streaks::toggle::ToggleAction;
use crate::streaks::{PeriodKey, StoredStreak};

// ============================================================================
// Compute
// ============================================================================

/// POST /api/streaks/compute
#[derive(Debug, Deserialize, Validate)]
pub struct ComputeStreakRequest {
    /// Opaque caller id, echoed back
    pub habit_id: Option<Uuid>,

    #[validate(length(min = 1, max = 64, message = "Frequency must be 1-64 characters"))]
    pub frequency: String,

    #[serde(default)]
    pub logs: Vec<CompletionRecord>,

    /// Evaluation time. Default: server now
    pub now: Option<DateTime<Utc>>,

    /// Values currently stored for the habit; when present the response
    /// carries the accumulated replacement
    pub stored: Option<StoredStreak>,
}

#[derive(Debug, Serialize)]
pub struct ComputeStreakResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<Uuid>,
    pub frequency: String,
    pub current_streak: u32,
    pub best_streak: u32,
    pub today_completed: bool,
    pub today_marked_incomplete: bool,
    /// Distinct completed periods in the supplied log
    pub completed_periods: usize,
    pub last_completed: Option<PeriodKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredStreak>,
}

// ============================================================================
// Toggle
// ============================================================================

/// POST /api/streaks/toggle
#[derive(Debug, Deserialize, Validate)]
pub struct ToggleStreakRequest {
    pub habit_id: Option<Uuid>,

    #[validate(length(min = 1, max = 64, message = "Frequency must be 1-64 characters"))]
    pub frequency: String,

    #[serde(default)]
    pub logs: Vec<CompletionRecord>,

    /// Calendar day to toggle. Default: today (UTC)
    pub date: Option<NaiveDate>,

    pub now: Option<DateTime<Utc>>,

    pub stored: Option<StoredStreak>,
}

#[derive(Debug, Serialize)]
pub struct ToggleStreakResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<Uuid>,
    pub action: ToggleAction,
    pub date: NaiveDate,
    pub logs: Vec<CompletionRecord>,
    pub current_streak: u32,
    pub best_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredStreak>,
}

// ============================================================================
// Rollover
// ============================================================================

/// POST /api/streaks/rollover
#[derive(Debug, Deserialize, Validate)]
pub struct RolloverRequest {
    pub habit_id: Option<Uuid>,

    #[validate(length(min = 1, max = 64, message = "Frequency must be 1-64 characters"))]
    pub frequency: String,

    #[serde(default)]
    pub logs: Vec<CompletionRecord>,

    pub now: Option<DateTime<Utc>>,

    #[serde(default)]
    pub stored: StoredStreak,
}

#[derive(Debug, Serialize)]
pub struct RolloverResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<Uuid>,
    /// Whether `now` is the first day of a new period
    pub due: bool,
    pub closed_period: Option<PeriodKey>,
    pub satisfied: bool,
    pub stored: StoredStreak,
}
