use crate::job::Job;
use std::collections::HashSet;
use std::fmt;

/// A data-quality problem on a job record.
///
/// These are diagnostics: the estimator clamps the affected job's remaining
/// hours and keeps scheduling the rest of the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidJobError {
    NegativeHours {
        job_id: String,
        field: &'static str,
        value: f64,
    },
    NonFiniteHours {
        job_id: String,
        field: &'static str,
    },
    CompletedExceedsEstimate {
        job_id: String,
        estimated: f64,
        completed: f64,
    },
    DuplicateId {
        job_id: String,
    },
}

impl InvalidJobError {
    pub fn job_id(&self) -> &str {
        match self {
            InvalidJobError::NegativeHours { job_id, .. }
            | InvalidJobError::NonFiniteHours { job_id, .. }
            | InvalidJobError::CompletedExceedsEstimate { job_id, .. }
            | InvalidJobError::DuplicateId { job_id } => job_id,
        }
    }
}

impl fmt::Display for InvalidJobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidJobError::NegativeHours {
                job_id,
                field,
                value,
            } => write!(f, "job {job_id} has negative {field} {value}"),
            InvalidJobError::NonFiniteHours { job_id, field } => {
                write!(f, "job {job_id} has a non-numeric {field}")
            }
            InvalidJobError::CompletedExceedsEstimate {
                job_id,
                estimated,
                completed,
            } => write!(
                f,
                "job {job_id} has {completed} hours completed against an estimate of {estimated}; remaining hours clamped to 0"
            ),
            InvalidJobError::DuplicateId { job_id } => {
                write!(f, "job id {job_id} appears more than once")
            }
        }
    }
}

impl std::error::Error for InvalidJobError {}

fn check_hours(
    job_id: &str,
    field: &'static str,
    value: f64,
    issues: &mut Vec<InvalidJobError>,
) -> bool {
    if !value.is_finite() {
        issues.push(InvalidJobError::NonFiniteHours {
            job_id: job_id.to_string(),
            field,
        });
        return false;
    }
    if value < 0.0 {
        issues.push(InvalidJobError::NegativeHours {
            job_id: job_id.to_string(),
            field,
            value,
        });
    }
    true
}

pub fn check_job(job: &Job) -> Vec<InvalidJobError> {
    let mut issues = Vec::new();
    let estimated_ok = check_hours(&job.id, "estimated_hours", job.estimated_hours, &mut issues);
    let completed_ok = check_hours(&job.id, "hours_completed", job.hours_completed, &mut issues);

    if estimated_ok && completed_ok && job.hours_completed > job.estimated_hours {
        issues.push(InvalidJobError::CompletedExceedsEstimate {
            job_id: job.id.clone(),
            estimated: job.estimated_hours,
            completed: job.hours_completed,
        });
    }
    issues
}

pub fn check_backlog(jobs: &[Job]) -> Vec<InvalidJobError> {
    let mut seen_ids = HashSet::with_capacity(jobs.len());
    let mut issues = Vec::new();
    for job in jobs {
        if !seen_ids.insert(job.id.as_str()) {
            issues.push(InvalidJobError::DuplicateId {
                job_id: job.id.clone(),
            });
        }
        issues.extend(check_job(job));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn job(id: &str, estimated: f64, completed: f64) -> Job {
        Job::new(id, estimated, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
            .with_hours_completed(completed)
    }

    #[test]
    fn clean_job_has_no_issues() {
        assert!(check_job(&job("a", 8.0, 2.0)).is_empty());
    }

    #[test]
    fn over_completed_job_is_reported() {
        let issues = check_job(&job("a", 8.0, 9.0));
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            InvalidJobError::CompletedExceedsEstimate { .. }
        ));
    }

    #[test]
    fn negative_and_non_finite_fields_are_reported() {
        let issues = check_job(&job("a", -3.0, f64::INFINITY));
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            InvalidJobError::NegativeHours {
                field: "estimated_hours",
                ..
            }
        ));
        assert!(matches!(
            issues[1],
            InvalidJobError::NonFiniteHours {
                field: "hours_completed",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_ids_are_reported_once_per_repeat() {
        let jobs = vec![job("a", 1.0, 0.0), job("b", 1.0, 0.0), job("a", 2.0, 0.0)];
        let issues = check_backlog(&jobs);
        assert_eq!(
            issues,
            vec![InvalidJobError::DuplicateId {
                job_id: "a".to_string()
            }]
        );
    }
}
