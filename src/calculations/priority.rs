use crate::job::Job;
use std::cmp::Ordering;

/// Ordering used to feed the forward pass.
///
/// Started work first, then jobs with a deadline (earliest first), then jobs
/// without one by the date they were received.
pub fn compare_priority(a: &Job, b: &Job) -> Ordering {
    b.is_started()
        .cmp(&a.is_started())
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.date_received.cmp(&b.date_received),
        })
}

/// Open jobs in priority order. Ties keep their input order.
pub fn priority_order(jobs: &[Job]) -> Vec<&Job> {
    let mut open: Vec<&Job> = jobs.iter().filter(|job| job.is_open()).collect();
    open.sort_by(|a, b| compare_priority(a, b));
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(jobs: &[&Job]) -> Vec<String> {
        jobs.iter().map(|job| job.id.clone()).collect()
    }

    #[test]
    fn started_beats_deadline() {
        let jobs = vec![
            Job::new("near", 1.0, d(2026, 1, 1)).with_deadline(d(2026, 1, 10)),
            Job::new("started", 1.0, d(2026, 1, 2)).with_status(JobStatus::Started),
        ];
        assert_eq!(ids(&priority_order(&jobs)), vec!["started", "near"]);
    }

    #[test]
    fn deadlines_before_undated_then_by_received() {
        let jobs = vec![
            Job::new("late-received", 1.0, d(2026, 1, 9)),
            Job::new("far", 1.0, d(2026, 1, 1)).with_deadline(d(2026, 3, 1)),
            Job::new("early-received", 1.0, d(2026, 1, 2)),
            Job::new("near", 1.0, d(2026, 1, 5)).with_deadline(d(2026, 2, 1)),
        ];
        assert_eq!(
            ids(&priority_order(&jobs)),
            vec!["near", "far", "early-received", "late-received"]
        );
    }

    #[test]
    fn complete_jobs_are_filtered_and_ties_are_stable() {
        let jobs = vec![
            Job::new("b", 1.0, d(2026, 1, 1)),
            Job::new("done", 1.0, d(2025, 1, 1)).with_status(JobStatus::Complete),
            Job::new("a", 1.0, d(2026, 1, 1)),
        ];
        assert_eq!(ids(&priority_order(&jobs)), vec!["b", "a"]);
    }
}
