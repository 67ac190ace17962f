use chrono::NaiveDate;
use serde::Serialize;

use crate::models::completion::CompletionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    /// No record existed for the day; a completed one was added.
    Created,
    Checked,
    Unchecked,
}

/// Toggle `day` in a habit's log: create the day's record if missing,
/// otherwise flip it. Any duplicates for the day are collapsed into the first
/// record so the log keeps one record per calendar day.
pub fn toggle(logs: &mut Vec<CompletionRecord>, day: NaiveDate) -> ToggleAction {
    let Some(first) = logs.iter().position(|r| r.day() == day) else {
        logs.push(CompletionRecord::on_day(day, true));
        return ToggleAction::Created;
    };

    let was_completed = logs.iter().any(|r| r.day() == day && r.completed);
    let mut index = 0;
    logs.retain(|r| {
        let keep = index <= first || r.day() != day;
        index += 1;
        keep
    });
    logs[first].completed = !was_completed;

    if was_completed {
        ToggleAction::Unchecked
    } else {
        ToggleAction::Checked
    }
}
