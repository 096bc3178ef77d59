use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::dates;

/// How far ahead the calendar looks for a working day before giving up.
pub const WORKING_DAY_SEARCH_LIMIT: i64 = 731;

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidCalendarError {
    NonPositiveHoursPerDay(f64),
    NoWorkingDays {
        from: NaiveDate,
        searched_days: i64,
    },
    WeekdayIndexOutOfRange(u8),
}

impl fmt::Display for InvalidCalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCalendarError::NonPositiveHoursPerDay(hours) => {
                write!(f, "hours per day must be positive (got {hours})")
            }
            InvalidCalendarError::NoWorkingDays {
                from,
                searched_days,
            } => write!(
                f,
                "no working day found within {searched_days} days of {from}"
            ),
            InvalidCalendarError::WeekdayIndexOutOfRange(index) => {
                write!(f, "weekday index {index} is outside 0-6 (Sunday=0)")
            }
        }
    }
}

impl std::error::Error for InvalidCalendarError {}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    days_per_week: u8,
    hours_per_day: f64,
    days_off: HashSet<Weekday>,
    custom_days_off: HashSet<NaiveDate>,
}

/// Serializable form of a [`WorkCalendar`], matching the stored work preferences.
///
/// Weekdays are indices with Sunday=0. Custom days off accept plain dates or
/// timestamps; timestamps are truncated to their calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCalendarConfig {
    pub days_per_week: u8,
    pub hours_per_day: f64,
    #[serde(default)]
    pub days_off: Vec<u8>,
    #[serde(default, with = "dates::calendar_day_list")]
    pub custom_days_off: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            days_per_week: 5,
            hours_per_day: 8.0,
            days_off: HashSet::from([Weekday::Sun]),
            custom_days_off: HashSet::new(),
        }
    }
}

impl WorkCalendar {
    pub const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn new(hours_per_day: f64, days_off: &[Weekday], custom_days_off: &[NaiveDate]) -> Self {
        let days_off: HashSet<Weekday> = days_off.iter().copied().collect();
        let days_per_week = (Self::ALL_WEEKDAYS.len() - days_off.len()) as u8;
        Self {
            days_per_week,
            hours_per_day,
            days_off,
            custom_days_off: custom_days_off.iter().copied().collect(),
        }
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Result<Self, InvalidCalendarError> {
        let mut days_off = HashSet::with_capacity(config.days_off.len());
        for &index in &config.days_off {
            days_off.insert(weekday_from_index(index)?);
        }
        Ok(Self {
            days_per_week: config.days_per_week,
            hours_per_day: config.hours_per_day,
            days_off,
            custom_days_off: config.custom_days_off.iter().copied().collect(),
        })
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    pub fn days_per_week(&self) -> u8 {
        self.days_per_week
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn days_off(&self) -> &HashSet<Weekday> {
        &self.days_off
    }

    pub fn custom_days_off(&self) -> &HashSet<NaiveDate> {
        &self.custom_days_off
    }

    /// Number of weekdays not marked as a regular day off.
    pub fn working_days_per_week(&self) -> usize {
        Self::ALL_WEEKDAYS.len() - self.days_off.len()
    }

    pub fn set_days_per_week(&mut self, days: u8) {
        self.days_per_week = days;
    }

    pub fn set_hours_per_day(&mut self, hours: f64) {
        self.hours_per_day = hours;
    }

    /// Flip a weekday between working and day off. Returns true if it is now off.
    pub fn toggle_day_off(&mut self, weekday: Weekday) -> bool {
        if self.days_off.remove(&weekday) {
            false
        } else {
            self.days_off.insert(weekday);
            true
        }
    }

    /// Flip a specific date between working and day off. Returns true if it is now off.
    pub fn toggle_custom_day_off(&mut self, date: NaiveDate) -> bool {
        if self.custom_days_off.remove(&date) {
            false
        } else {
            self.custom_days_off.insert(date);
            true
        }
    }

    pub fn validate(&self) -> Result<(), InvalidCalendarError> {
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 {
            return Err(InvalidCalendarError::NonPositiveHoursPerDay(
                self.hours_per_day,
            ));
        }
        Ok(())
    }

    /// Check whether capacity may be consumed on a date
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.days_off.contains(&date.weekday()) && !self.custom_days_off.contains(&date)
    }

    /// Same as [`Self::is_working_day`], ignoring the time of day.
    pub fn is_working_instant(&self, at: NaiveDateTime) -> bool {
        self.is_working_day(at.date())
    }

    /// First working day on or after `from`.
    pub fn next_working_day(&self, from: NaiveDate) -> Result<NaiveDate, InvalidCalendarError> {
        let mut current = from;
        for _ in 0..WORKING_DAY_SEARCH_LIMIT {
            if self.is_working_day(current) {
                return Ok(current);
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        Err(InvalidCalendarError::NoWorkingDays {
            from,
            searched_days: WORKING_DAY_SEARCH_LIMIT,
        })
    }

    /// Get all working days in a date range (inclusive)
    pub fn working_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;

        while current <= end {
            if self.is_working_day(current) {
                days.push(current);
            }
            current = current + Duration::days(1);
        }
        days
    }

    /// Count working days in a date range (inclusive)
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        self.working_days_in_range(start, end).len() as i64
    }
}

/// Free-function form of [`WorkCalendar::is_working_day`].
pub fn is_working_day(date: NaiveDate, calendar: &WorkCalendar) -> bool {
    calendar.is_working_day(date)
}

/// Weekday for an index where Sunday=0 and Saturday=6.
pub fn weekday_from_index(index: u8) -> Result<Weekday, InvalidCalendarError> {
    WorkCalendar::ALL_WEEKDAYS
        .get(index as usize)
        .copied()
        .ok_or(InvalidCalendarError::WeekdayIndexOutOfRange(index))
}

pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendarConfig::from(&WorkCalendar::default())
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let mut days_off: Vec<u8> = calendar.days_off.iter().map(|wd| weekday_index(*wd)).collect();
        days_off.sort_unstable();

        let mut custom_days_off: Vec<NaiveDate> = calendar.custom_days_off.iter().copied().collect();
        custom_days_off.sort();

        Self {
            days_per_week: calendar.days_per_week,
            hours_per_day: calendar.hours_per_day,
            days_off,
            custom_days_off,
        }
    }
}
