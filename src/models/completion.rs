use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One logged day for a habit. Only the UTC calendar date of `date` matters;
/// time of day and the client's offset are normalized away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    #[serde(deserialize_with = "deserialize_record_date")]
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(date: DateTime<Utc>, completed: bool) -> Self {
        Self { date, completed }
    }

    /// Record stamped at midnight UTC of `day`.
    pub fn on_day(day: NaiveDate, completed: bool) -> Self {
        Self {
            date: Utc.from_utc_datetime(&day.and_time(Default::default())),
            completed,
        }
    }

    /// UTC calendar date the record pertains to.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Timestamp(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Day(NaiveDate),
}

fn deserialize_record_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawDate::deserialize(deserializer)?;
    Ok(match raw {
        RawDate::Timestamp(ts) => ts.with_timezone(&Utc),
        RawDate::Naive(ndt) => Utc.from_utc_datetime(&ndt),
        RawDate::Day(day) => Utc.from_utc_datetime(&day.and_time(Default::default())),
    })
}

// Anything but a literal `true` counts as not completed.
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_json::Value::Bool(true)))
}
