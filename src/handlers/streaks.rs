use axum::{extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::dto::{
    ComputeStreakRequest, ComputeStreakResponse, RolloverRequest, RolloverResponse,
    ToggleStreakRequest, ToggleStreakResponse,
};
use crate::error::{AppError, AppResult};
use crate::streaks::rollover::{is_rollover_due, rollover};
use crate::streaks::toggle::toggle;
use crate::streaks::{Frequency, StreakEngine};
use crate::AppState;

pub async fn compute_streak(
    State(state): State<AppState>,
    Json(body): Json<ComputeStreakRequest>,
) -> AppResult<Json<ComputeStreakResponse>> {
    body.validate()?;
    check_log_limit(&state, body.logs.len())?;

    let frequency: Frequency = body.frequency.parse()?;
    let engine = StreakEngine::new(frequency);
    let now = body.now.unwrap_or_else(Utc::now);

    let completed = engine.completed_periods(&body.logs, now);
    let result = engine.evaluate(&completed);
    let stored = body.stored.map(|s| s.accumulate(result));

    tracing::debug!(
        habit_id = ?body.habit_id,
        frequency = %frequency,
        current_streak = result.current_streak,
        best_streak = result.best_streak,
        skipped_future = completed.skipped_future(),
        "Streak computed"
    );

    Ok(Json(ComputeStreakResponse {
        habit_id: body.habit_id,
        frequency: frequency.to_string(),
        current_streak: result.current_streak,
        best_streak: result.best_streak,
        today_completed: completed.today_completed(),
        today_marked_incomplete: completed.today_marked_incomplete(),
        completed_periods: completed.count(),
        last_completed: completed.last_completed(),
        stored,
    }))
}

/// Creates the day's record if missing, flips it otherwise
pub async fn toggle_streak(
    State(state): State<AppState>,
    Json(body): Json<ToggleStreakRequest>,
) -> AppResult<Json<ToggleStreakResponse>> {
    body.validate()?;
    check_log_limit(&state, body.logs.len())?;

    let engine = StreakEngine::new(body.frequency.parse()?);
    let now = body.now.unwrap_or_else(Utc::now);
    let today = now.date_naive();
    let date = body.date.unwrap_or(today);

    if date > today {
        return Err(AppError::Validation("date must not be after today".into()));
    }

    let mut logs = body.logs;
    let action = toggle(&mut logs, date);
    let result = engine.compute(&logs, now);
    let stored = body.stored.map(|s| s.accumulate(result));

    Ok(Json(ToggleStreakResponse {
        habit_id: body.habit_id,
        action,
        date,
        logs,
        current_streak: result.current_streak,
        best_streak: result.best_streak,
        stored,
    }))
}

pub async fn rollover_streak(
    State(state): State<AppState>,
    Json(body): Json<RolloverRequest>,
) -> AppResult<Json<RolloverResponse>> {
    body.validate()?;
    check_log_limit(&state, body.logs.len())?;

    let engine = StreakEngine::new(body.frequency.parse()?);
    let now = body.now.unwrap_or_else(Utc::now);
    let outcome = rollover(&engine, &body.logs, now, body.stored);

    Ok(Json(RolloverResponse {
        habit_id: body.habit_id,
        due: is_rollover_due(&engine, now),
        closed_period: outcome.closed_period,
        satisfied: outcome.satisfied,
        stored: outcome.stored,
    }))
}

fn check_log_limit(state: &AppState, records: usize) -> AppResult<()> {
    if records > state.config.max_log_records {
        return Err(AppError::Validation(format!(
            "At most {} log records are accepted per request",
            state.config.max_log_records
        )));
    }
    Ok(())
}
