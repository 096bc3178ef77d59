use crate::dates;
use crate::job::JobStatus;
use crate::job_validation::InvalidJobError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated line of the work queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub job_id: String,
    #[serde(with = "dates::calendar_day")]
    pub estimated_completion_date: NaiveDate,
    pub remaining_hours: f64,
    pub is_urgent: bool,
    #[serde(
        default,
        with = "dates::optional_calendar_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
    pub status: JobStatus,
}

impl ScheduleEntry {
    /// Calendar days past the deadline, if the entry is late.
    pub fn days_late(&self) -> Option<i64> {
        let deadline = self.deadline?;
        let late = (self.estimated_completion_date - deadline).num_days();
        (late > 0).then_some(late)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub today: NaiveDate,
    pub scheduled_count: usize,
    pub complete_count: usize,
    pub urgent_count: usize,
    pub total_remaining_hours: f64,
    pub final_completion: Option<NaiveDate>,
    pub job_issue_count: usize,
}

impl ScheduleSummary {
    pub fn from_entries(
        today: NaiveDate,
        entries: &[ScheduleEntry],
        complete_count: usize,
        job_issue_count: usize,
    ) -> Self {
        Self {
            today,
            scheduled_count: entries.len(),
            complete_count,
            urgent_count: entries.iter().filter(|entry| entry.is_urgent).count(),
            total_remaining_hours: entries.iter().map(|entry| entry.remaining_hours).sum(),
            final_completion: entries
                .iter()
                .map(|entry| entry.estimated_completion_date)
                .max(),
            job_issue_count,
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("today={}", self.today));
        parts.push(format!("jobs={}", self.scheduled_count));
        parts.push(format!("hours={}", self.total_remaining_hours));
        if let Some(date) = self.final_completion {
            parts.push(format!("finish={}", date));
        }
        if self.urgent_count > 0 {
            parts.push(format!("urgent={}", self.urgent_count));
        }
        if self.complete_count > 0 {
            parts.push(format!("complete={}", self.complete_count));
        }
        if self.job_issue_count > 0 {
            parts.push(format!("issues={}", self.job_issue_count));
        }
        parts.join(", ")
    }
}

/// Everything one estimation run produces.
#[derive(Debug, Clone)]
pub struct EstimationReport {
    pub entries: Vec<ScheduleEntry>,
    pub job_issues: Vec<InvalidJobError>,
    pub summary: ScheduleSummary,
}

impl EstimationReport {
    pub fn entry(&self, job_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|entry| entry.job_id == job_id)
    }

    pub fn urgent(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|entry| entry.is_urgent)
    }
}
