use crate::calculations::forward_pass::ForwardPass;
use crate::calculations::priority::priority_order;
use crate::calculations::urgency::presentation_order;
use crate::calendar::{InvalidCalendarError, WorkCalendar};
use crate::job::Job;
use crate::job_validation;
use crate::schedule::{EstimationReport, ScheduleEntry, ScheduleSummary};
use chrono::{Local, NaiveDate};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    InvalidCalendar(InvalidCalendarError),
    DateOutOfRange { after: NaiveDate },
}

impl fmt::Display for EstimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimationError::InvalidCalendar(err) => write!(f, "invalid calendar: {err}"),
            EstimationError::DateOutOfRange { after } => {
                write!(f, "schedule runs past the last representable date after {after}")
            }
        }
    }
}

impl std::error::Error for EstimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstimationError::InvalidCalendar(err) => Some(err),
            EstimationError::DateOutOfRange { .. } => None,
        }
    }
}

impl From<InvalidCalendarError> for EstimationError {
    fn from(value: InvalidCalendarError) -> Self {
        Self::InvalidCalendar(value)
    }
}

/// Projects completion dates for a backlog against a calendar, starting `today`.
///
/// Every run recomputes from the inputs; nothing is retained between calls.
pub struct CompletionEstimator<'a> {
    calendar: &'a WorkCalendar,
    today: NaiveDate,
}

impl<'a> CompletionEstimator<'a> {
    pub fn new(calendar: &'a WorkCalendar, today: NaiveDate) -> Self {
        Self { calendar, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn execute(&self, jobs: &[Job]) -> Result<EstimationReport, EstimationError> {
        let job_issues = job_validation::check_backlog(jobs);
        for issue in &job_issues {
            warn!(job_id = issue.job_id(), "{issue}");
        }

        let ordered = priority_order(jobs);
        let complete_count = jobs.len() - ordered.len();

        let simulated = ForwardPass::new(self.calendar).execute(&ordered, self.today)?;
        let entries = presentation_order(simulated);

        let summary =
            ScheduleSummary::from_entries(self.today, &entries, complete_count, job_issues.len());
        info!(summary = %summary.to_cli_summary(), "estimated completions");

        Ok(EstimationReport {
            entries,
            job_issues,
            summary,
        })
    }
}

/// Dated, ordered work queue for every open job.
pub fn estimate_completions(
    jobs: &[Job],
    calendar: &WorkCalendar,
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>, EstimationError> {
    CompletionEstimator::new(calendar, today)
        .execute(jobs)
        .map(|report| report.entries)
}

/// [`estimate_completions`] starting from the local date.
pub fn estimate_completions_now(
    jobs: &[Job],
    calendar: &WorkCalendar,
) -> Result<Vec<ScheduleEntry>, EstimationError> {
    estimate_completions(jobs, calendar, Local::now().date_naive())
}
