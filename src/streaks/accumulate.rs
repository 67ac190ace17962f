use serde::{Deserialize, Serialize};

use super::engine::StreakResult;

/// Streak values a habit-store keeps between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredStreak {
    pub current_streak: u32,
    pub best_streak: u32,
}

impl StoredStreak {
    /// Fold a fresh computation into the stored values. Best only ever grows,
    /// so a trimmed or edited log cannot lose an older record.
    pub fn accumulate(self, computed: StreakResult) -> StoredStreak {
        StoredStreak {
            current_streak: computed.current_streak,
            best_streak: self
                .best_streak
                .max(computed.current_streak)
                .max(computed.best_streak),
        }
    }
}
