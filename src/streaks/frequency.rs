use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use super::period::{week_start, PeriodKey, WeekdaySet};
use crate::error::StreakError;

/// How often a habit is expected to be completed. Each variant knows how to
/// bucket a calendar day into its period, so the streak walk is written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    EveryNDays(NonZeroU32),
    WeekdaySubset(WeekdaySet),
}

impl Frequency {
    pub fn every_n_days(n: u32) -> Result<Self, StreakError> {
        match NonZeroU32::new(n) {
            Some(n) if n.get() == 1 => Ok(Self::Daily),
            Some(n) => Ok(Self::EveryNDays(n)),
            None => Err(StreakError::InvalidInterval(n)),
        }
    }

    pub fn weekdays(days: WeekdaySet) -> Result<Self, StreakError> {
        if days.is_empty() {
            return Err(StreakError::EmptyWeekdaySet);
        }
        Ok(Self::WeekdaySubset(days))
    }

    /// Period containing `day`, or `None` when the schedule does not cover it
    /// (an unscheduled weekday).
    pub fn period_of(&self, day: NaiveDate) -> Option<PeriodKey> {
        let start = match self {
            Self::Daily => day,
            Self::Weekly => week_start(day)?,
            Self::Monthly => day.with_day(1)?,
            Self::EveryNDays(n) => {
                // 0001-01-01 is day 1 of the common era and a Monday.
                let n = i64::from(n.get());
                let offset = i64::from(day.num_days_from_ce()) - 1;
                let bucket = offset.div_euclid(n) * n + 1;
                NaiveDate::from_num_days_from_ce_opt(i32::try_from(bucket).ok()?)?
            }
            Self::WeekdaySubset(days) => {
                if !days.contains(day.weekday()) {
                    return None;
                }
                day
            }
        };
        Some(PeriodKey::new(start))
    }

    /// The period immediately before the one containing `day`.
    pub fn period_preceding(&self, day: NaiveDate) -> Option<PeriodKey> {
        match self {
            Self::WeekdaySubset(days) => {
                let mut cursor = day;
                for _ in 0..7 {
                    cursor = cursor.pred_opt()?;
                    if days.contains(cursor.weekday()) {
                        return Some(PeriodKey::new(cursor));
                    }
                }
                None
            }
            _ => {
                let start = self.period_of(day)?.start();
                self.period_of(start.pred_opt()?)
            }
        }
    }

    pub fn previous(&self, key: PeriodKey) -> Option<PeriodKey> {
        self.period_preceding(key.start())
    }

    /// Whether `day` opens a new period, i.e. the day a rollover should run.
    pub fn starts_period(&self, day: NaiveDate) -> bool {
        self.period_of(day).is_some_and(|key| key.start() == day)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Weekly => f.write_str("weekly"),
            Self::Monthly => f.write_str("monthly"),
            Self::EveryNDays(n) => write!(f, "every {} days", n),
            Self::WeekdaySubset(days) => write!(f, "{}", days),
        }
    }
}

impl FromStr for Frequency {
    type Err = StreakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" | "every day" | "everyday" => return Ok(Self::Daily),
            "weekly" | "every week" => return Ok(Self::Weekly),
            "monthly" | "every month" => return Ok(Self::Monthly),
            "weekdays" | "weekdays only" => return Self::weekdays(WeekdaySet::WEEKDAYS),
            "weekends" | "weekends only" => return Self::weekdays(WeekdaySet::WEEKENDS),
            _ => {}
        }

        if let Some(n) = normalized
            .strip_prefix("every ")
            .and_then(|rest| rest.strip_suffix(" days"))
        {
            let n: u32 = n
                .trim()
                .parse()
                .map_err(|_| StreakError::UnsupportedFrequency(s.to_string()))?;
            return Self::every_n_days(n);
        }

        let days: Result<Vec<Weekday>, _> = normalized
            .split(',')
            .map(|part| part.trim().parse::<Weekday>())
            .collect();
        match days {
            Ok(days) => Self::weekdays(days.into_iter().collect()),
            Err(_) => Err(StreakError::UnsupportedFrequency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(y: i32, m: u32, d: u32) -> Option<PeriodKey> {
        Some(PeriodKey::new(date(y, m, d)))
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_named_frequencies() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!(" Weekly ".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(
            "every month".parse::<Frequency>().unwrap(),
            Frequency::Monthly
        );
        assert_eq!(
            "Weekdays only".parse::<Frequency>().unwrap(),
            Frequency::WeekdaySubset(WeekdaySet::WEEKDAYS)
        );
    }

    #[test]
    fn test_parse_every_n_days() {
        assert_eq!(
            "Every 3 days".parse::<Frequency>().unwrap(),
            Frequency::EveryNDays(NonZeroU32::new(3).unwrap())
        );
        assert_eq!(
            "every 1 days".parse::<Frequency>().unwrap(),
            Frequency::Daily
        );
        assert!(matches!(
            "every 0 days".parse::<Frequency>(),
            Err(StreakError::InvalidInterval(0))
        ));
    }

    #[test]
    fn test_parse_weekday_list() {
        let freq: Frequency = "mon, wed,fri".parse().unwrap();
        let Frequency::WeekdaySubset(days) = freq else {
            panic!("expected weekday subset, got {:?}", freq);
        };
        assert!(days.contains(Weekday::Wed));
        assert!(!days.contains(Weekday::Tue));
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn test_parse_unknown_fails_fast() {
        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        let StreakError::UnsupportedFrequency(input) = err else {
            panic!("expected unsupported frequency, got {:?}", err);
        };
        assert_eq!(input, "fortnightly");
        assert!("".parse::<Frequency>().is_err());
        assert!("every few days".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let all = [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::EveryNDays(NonZeroU32::new(4).unwrap()),
            Frequency::WeekdaySubset(WeekdaySet::WEEKENDS),
            "tue,thu".parse().unwrap(),
        ];
        for freq in all {
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
    }

    // ── Bucketing ────────────────────────────────────────────────────────

    #[test]
    fn test_weekly_sunday_belongs_to_preceding_monday() {
        assert_eq!(
            Frequency::Weekly.period_of(date(2025, 6, 29)),
            key(2025, 6, 23)
        );
        assert_eq!(
            Frequency::Weekly.period_preceding(date(2025, 6, 29)),
            key(2025, 6, 16)
        );
    }

    #[test]
    fn test_daily_preceding_crosses_month_and_year() {
        assert_eq!(
            Frequency::Daily.period_preceding(date(2025, 6, 1)),
            key(2025, 5, 31)
        );
        assert_eq!(
            Frequency::Daily.period_preceding(date(2025, 1, 1)),
            key(2024, 12, 31)
        );
    }

    #[test]
    fn test_monthly_buckets() {
        assert_eq!(
            Frequency::Monthly.period_of(date(2024, 2, 29)),
            key(2024, 2, 1)
        );
        assert_eq!(
            Frequency::Monthly.period_preceding(date(2025, 1, 15)),
            key(2024, 12, 1)
        );
    }

    #[test]
    fn test_every_n_days_buckets_are_contiguous() {
        let freq = Frequency::every_n_days(3).unwrap();
        let start = freq.period_of(date(2025, 6, 10)).unwrap().start();
        for offset in 0..3u64 {
            let day = start.checked_add_days(chrono::Days::new(offset)).unwrap();
            assert_eq!(freq.period_of(day).unwrap().start(), start);
        }
        let next = start.checked_add_days(chrono::Days::new(3)).unwrap();
        assert_eq!(freq.period_of(next).unwrap().start(), next);
        assert_eq!(
            freq.previous(PeriodKey::new(next)),
            Some(PeriodKey::new(start))
        );
    }

    #[test]
    fn test_weekday_subset_skips_unscheduled_days() {
        let freq = Frequency::WeekdaySubset(WeekdaySet::WEEKDAYS);
        // Saturday is not scheduled
        assert_eq!(freq.period_of(date(2025, 6, 28)), None);
        // Monday's predecessor is the previous Friday
        assert_eq!(freq.period_preceding(date(2025, 6, 30)), key(2025, 6, 27));
        // Sunday's predecessor is Friday as well
        assert_eq!(freq.period_preceding(date(2025, 6, 29)), key(2025, 6, 27));
    }

    #[test]
    fn test_starts_period() {
        assert!(Frequency::Daily.starts_period(date(2025, 6, 25)));
        assert!(Frequency::Weekly.starts_period(date(2025, 6, 23)));
        assert!(!Frequency::Weekly.starts_period(date(2025, 6, 29)));
        assert!(Frequency::Monthly.starts_period(date(2025, 7, 1)));
        let weekdays = Frequency::WeekdaySubset(WeekdaySet::WEEKDAYS);
        assert!(!weekdays.starts_period(date(2025, 6, 28)));
    }
}
