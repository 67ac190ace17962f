use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use habitarc_streaks::models::completion::CompletionRecord;
use habitarc_streaks::streaks::toggle::toggle;
use habitarc_streaks::streaks::{Frequency, StoredStreak, StreakEngine};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 25).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.from_utc_datetime(&today().and_hms_opt(18, 0, 0).unwrap())
}

fn day_back(offset: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(offset)).unwrap()
}

fn frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just("every 3 days".parse::<Frequency>().unwrap()),
        Just("weekdays".parse::<Frequency>().unwrap()),
    ]
}

fn logs() -> impl Strategy<Value = Vec<CompletionRecord>> {
    prop::collection::vec((0u64..60, 0u32..24, any::<bool>()), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(offset, hour, completed)| {
                let day = day_back(offset);
                let stamp = Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap());
                CompletionRecord::new(stamp, completed)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn recompute_is_idempotent(freq in frequency(), logs in logs()) {
        let engine = StreakEngine::new(freq);
        prop_assert_eq!(engine.compute(&logs, now()), engine.compute(&logs, now()));
    }

    #[test]
    fn best_is_at_least_current(freq in frequency(), logs in logs()) {
        let result = StreakEngine::new(freq).compute(&logs, now());
        prop_assert!(result.best_streak >= result.current_streak);
    }

    #[test]
    fn record_order_does_not_matter(freq in frequency(), logs in logs()) {
        let engine = StreakEngine::new(freq);
        let mut reversed = logs.clone();
        reversed.reverse();
        prop_assert_eq!(
            engine.compute(&logs, now()),
            engine.compute(&reversed, now())
        );
    }

    #[test]
    fn stored_best_never_decreases_under_toggles(
        freq in frequency(),
        toggles in prop::collection::vec(0u64..20, 1..60),
    ) {
        let engine = StreakEngine::new(freq);
        let mut logs = Vec::new();
        let mut stored = StoredStreak::default();

        for offset in toggles {
            toggle(&mut logs, day_back(offset));
            let previous_best = stored.best_streak;
            stored = stored.accumulate(engine.compute(&logs, now()));
            prop_assert!(stored.best_streak >= previous_best);
            prop_assert!(stored.best_streak >= stored.current_streak);
        }
    }

    #[test]
    fn toggle_keeps_one_record_per_day(toggles in prop::collection::vec(0u64..10, 1..40)) {
        let mut logs = Vec::new();
        for offset in toggles {
            toggle(&mut logs, day_back(offset));
        }
        let mut days: Vec<_> = logs.iter().map(|r| r.day()).collect();
        let total = days.len();
        days.sort();
        days.dedup();
        prop_assert_eq!(days.len(), total);
    }

    #[test]
    fn future_records_never_lengthen_streak(
        freq in frequency(),
        logs in logs(),
        ahead in 1u64..30,
    ) {
        let engine = StreakEngine::new(freq);
        let baseline = engine.compute(&logs, now());
        let mut with_future = logs.clone();
        with_future.push(CompletionRecord::on_day(
            today().checked_add_days(Days::new(ahead)).unwrap(),
            true,
        ));
        prop_assert_eq!(engine.compute(&with_future, now()), baseline);
    }
}
