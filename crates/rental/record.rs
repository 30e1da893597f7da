use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an ISO-8601 day, with or without a time of day.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(d);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_day(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date {:?}", value)))
}

/// One day of rentals, as found in the daily dataset.
///
/// Categorical columns keep the exact text of the file. `count` is expected to
/// equal `casual + registered`; nothing here checks it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "dateday", deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub count: u64,
    pub casual: u64,
    pub registered: u64,
    pub season: String,
    pub month: String,
    pub weekday: String,
    pub workingday: String,
    pub holiday: String,
    pub weathersit: String,
}
