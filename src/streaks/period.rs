use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// First calendar day of a streak period (the day itself, a week's Monday,
/// the 1st of a month, ...). Used for set membership and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(NaiveDate);

impl PeriodKey {
    pub fn new(start: NaiveDate) -> Self {
        Self(start)
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Monday of the ISO week containing `day`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    let since_monday = day.weekday().num_days_from_monday(); // Mon=0 .. Sun=6
    day.checked_sub_days(Days::new(u64::from(since_monday)))
}

/// Set of ISO weekdays a schedule applies to. Bit `i` is set when the day with
/// `num_days_from_monday() == i` is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const WEEKDAYS: WeekdaySet = WeekdaySet(0b001_1111);
    pub const WEEKENDS: WeekdaySet = WeekdaySet(0b110_0000);

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ISO_WEEK.iter().copied().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet(0);
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::WEEKDAYS {
            return f.write_str("weekdays");
        }
        if *self == Self::WEEKENDS {
            return f.write_str("weekends");
        }
        let names: Vec<&str> = self.iter().map(short_name).collect();
        f.write_str(&names.join(","))
    }
}

const ISO_WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}
