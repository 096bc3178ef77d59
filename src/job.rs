use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Waiting,
    Started,
    Complete,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Waiting => "waiting",
            JobStatus::Started => "started",
            JobStatus::Complete => "complete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Waiting => "Waiting",
            JobStatus::Started => "In Progress",
            JobStatus::Complete => "Complete",
        }
    }

    pub fn variants() -> [(&'static str, &'static str); 3] {
        [
            ("waiting", "Not started yet"),
            ("started", "In progress, scheduled ahead of waiting work"),
            ("complete", "Finished, excluded from estimation"),
        ]
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waiting" => Ok(JobStatus::Waiting),
            "started" | "in_progress" | "in-progress" => Ok(JobStatus::Started),
            "complete" | "completed" | "done" => Ok(JobStatus::Complete),
            _ => Err(()),
        }
    }
}

/// A unit of billable work as read from the backlog. The estimator never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub estimated_hours: f64,
    #[serde(default)]
    pub hours_completed: f64,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(
        default,
        with = "dates::optional_calendar_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
    #[serde(with = "dates::calendar_day")]
    pub date_received: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Job {
    pub fn new(id: impl Into<String>, estimated_hours: f64, date_received: NaiveDate) -> Self {
        Self {
            id: id.into(),
            estimated_hours,
            hours_completed: 0.0,
            status: JobStatus::Waiting,
            deadline: None,
            date_received,
            description: None,
        }
    }

    pub fn with_hours_completed(mut self, hours: f64) -> Self {
        self.hours_completed = hours;
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Hours still to be worked, floored at zero.
    ///
    /// Non-finite hour fields count as zero so a single bad record cannot
    /// stall the whole queue.
    pub fn remaining_hours(&self) -> f64 {
        let estimated = finite_or_zero(self.estimated_hours);
        let completed = finite_or_zero(self.hours_completed);
        (estimated - completed).max(0.0)
    }

    pub fn is_open(&self) -> bool {
        self.status != JobStatus::Complete
    }

    pub fn is_started(&self) -> bool {
        self.status == JobStatus::Started
    }

    /// Share of the estimate already worked, 0..=100.
    pub fn progress_percent(&self) -> Option<f64> {
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return None;
        }
        let completed = finite_or_zero(self.hours_completed);
        Some((completed / self.estimated_hours * 100.0).clamp(0.0, 100.0))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn received() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    #[test]
    fn remaining_hours_is_floored_at_zero() {
        let job = Job::new("a", 4.0, received()).with_hours_completed(6.5);
        assert_eq!(job.remaining_hours(), 0.0);

        let job = Job::new("b", 10.0, received()).with_hours_completed(2.5);
        assert_eq!(job.remaining_hours(), 7.5);

        let job = Job::new("c", f64::NAN, received());
        assert_eq!(job.remaining_hours(), 0.0);
    }

    #[test]
    fn status_parses_aliases() {
        assert_eq!("Started".parse::<JobStatus>(), Ok(JobStatus::Started));
        assert_eq!("in-progress".parse::<JobStatus>(), Ok(JobStatus::Started));
        assert_eq!("done".parse::<JobStatus>(), Ok(JobStatus::Complete));
        assert!("paused".parse::<JobStatus>().is_err());
    }
}
