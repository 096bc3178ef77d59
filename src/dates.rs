//! Calendar-day parsing shared by the job and calendar records.
//!
//! Stored records may carry full timestamps where only the day matters, so
//! every date field accepts either `YYYY-MM-DD` or a timestamp and keeps the
//! calendar day. Dates are always written back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_calendar_day(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|stamp| stamp.date())
}

pub fn format_calendar_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Long form used in listings, e.g. `Fri, Oct 16, 2026`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

fn invalid_day<E: serde::de::Error>(raw: &str) -> E {
    E::custom(format!("invalid date '{raw}' (expected YYYY-MM-DD or a timestamp)"))
}

pub mod calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_day(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_day(&raw).ok_or_else(|| super::invalid_day(&raw))
    }
}

pub mod optional_calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&super::format_calendar_day(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_calendar_day(&raw)
                .map(Some)
                .ok_or_else(|| super::invalid_day(&raw)),
            None => Ok(None),
        }
    }
}

pub mod calendar_day_list {
    use chrono::NaiveDate;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dates: &[NaiveDate], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(dates.len()))?;
        for date in dates {
            seq.serialize_element(&super::format_calendar_day(*date))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<NaiveDate>, D::Error> {
        let raw: Vec<String> = Vec::deserialize(deserializer)?;
        let mut dates = Vec::with_capacity(raw.len());
        for value in raw {
            let date = super::parse_calendar_day(&value).ok_or_else(|| super::invalid_day(&value))?;
            dates.push(date);
        }
        dates.sort();
        dates.dedup();
        Ok(dates)
    }
}
