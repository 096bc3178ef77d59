pub mod calculations;
pub mod calendar;
pub mod dates;
pub mod estimator;
pub mod import;
pub mod job;
pub mod job_validation;
pub mod schedule;

pub use calendar::{InvalidCalendarError, WorkCalendar, WorkCalendarConfig, is_working_day};
pub use estimator::{
    CompletionEstimator, EstimationError, estimate_completions, estimate_completions_now,
};
pub use import::{
    Backlog, ImportError, load_backlog_from_json, load_calendar_from_json, load_jobs_from_csv,
    save_backlog_to_json, save_calendar_to_json, save_jobs_to_csv,
};
pub use job::{Job, JobStatus};
pub use job_validation::{InvalidJobError, check_backlog, check_job};
pub use schedule::{EstimationReport, ScheduleEntry, ScheduleSummary};
