use crate::calendar::{InvalidCalendarError, WorkCalendar, WorkCalendarConfig};
use crate::dates;
use crate::job::{Job, JobStatus};
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug)]
pub enum ImportError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidCalendar(InvalidCalendarError),
    InvalidData(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Serialization(err) => write!(f, "serialization error: {err}"),
            ImportError::Io(err) => write!(f, "io error: {err}"),
            ImportError::Csv(err) => write!(f, "csv error: {err}"),
            ImportError::InvalidCalendar(err) => write!(f, "invalid calendar: {err}"),
            ImportError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<SerdeJsonError> for ImportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for ImportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<InvalidCalendarError> for ImportError {
    fn from(value: InvalidCalendarError) -> Self {
        Self::InvalidCalendar(value)
    }
}

pub type ImportResult<T> = Result<T, ImportError>;

/// A snapshot of open work plus the calendar it should be planned against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backlog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<WorkCalendarConfig>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Backlog {
    /// The snapshot's calendar, or the default work preferences when absent.
    pub fn work_calendar(&self) -> ImportResult<WorkCalendar> {
        match &self.calendar {
            Some(config) => Ok(WorkCalendar::from_config(config)?),
            None => Ok(WorkCalendar::default()),
        }
    }
}

pub fn load_backlog_from_json<P: AsRef<Path>>(path: P) -> ImportResult<Backlog> {
    let file = File::open(path)?;
    let backlog: Backlog = serde_json::from_reader(file)?;
    if let Some(config) = &backlog.calendar {
        WorkCalendar::from_config(config)?;
    }
    Ok(backlog)
}

pub fn save_backlog_to_json<P: AsRef<Path>>(backlog: &Backlog, path: P) -> ImportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, backlog)?;
    Ok(())
}

pub fn load_calendar_from_json<P: AsRef<Path>>(path: P) -> ImportResult<WorkCalendar> {
    let file = File::open(path)?;
    let config: WorkCalendarConfig = serde_json::from_reader(file)?;
    Ok(WorkCalendar::from_config(&config)?)
}

pub fn save_calendar_to_json<P: AsRef<Path>>(calendar: &WorkCalendar, path: P) -> ImportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &calendar.to_config())?;
    Ok(())
}

#[derive(Default, Serialize, Deserialize)]
struct JobCsvRecord {
    id: String,
    estimated_hours: String,
    #[serde(default)]
    hours_completed: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    deadline: String,
    date_received: String,
    #[serde(default)]
    description: String,
}

impl JobCsvRecord {
    fn into_job(self) -> ImportResult<Job> {
        if self.id.trim().is_empty() {
            return Err(ImportError::InvalidData("job row is missing an id".into()));
        }
        let id = self.id.trim().to_string();
        let estimated_hours = parse_f64(&self.estimated_hours)?.ok_or_else(|| {
            ImportError::InvalidData(format!("job {id} is missing estimated_hours"))
        })?;
        let date_received = parse_date(&self.date_received)?.ok_or_else(|| {
            ImportError::InvalidData(format!("job {id} is missing date_received"))
        })?;
        let status = if self.status.trim().is_empty() {
            JobStatus::default()
        } else {
            JobStatus::from_str(&self.status).map_err(|_| {
                ImportError::InvalidData(format!("job {id} has unknown status '{}'", self.status))
            })?
        };

        let mut job = Job::new(id, estimated_hours, date_received).with_status(status);
        job.hours_completed = parse_f64(&self.hours_completed)?.unwrap_or(0.0);
        job.deadline = parse_date(&self.deadline)?;
        job.description = parse_string_option(self.description);
        Ok(job)
    }
}

impl From<&Job> for JobCsvRecord {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            estimated_hours: job.estimated_hours.to_string(),
            hours_completed: job.hours_completed.to_string(),
            status: job.status.as_str().to_string(),
            deadline: job.deadline.map(dates::format_calendar_day).unwrap_or_default(),
            date_received: dates::format_calendar_day(job.date_received),
            description: job.description.clone().unwrap_or_default(),
        }
    }
}

pub fn load_jobs_from_csv<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Job>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut jobs = Vec::new();
    for record in reader.deserialize::<JobCsvRecord>() {
        jobs.push(record?.into_job()?);
    }
    Ok(jobs)
}

pub fn save_jobs_to_csv<P: AsRef<Path>>(jobs: &[Job], path: P) -> ImportResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for job in jobs {
        writer.serialize(JobCsvRecord::from(job))?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_date(input: &str) -> ImportResult<Option<chrono::NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    dates::parse_calendar_day(input)
        .map(Some)
        .ok_or_else(|| ImportError::InvalidData(format!("invalid date '{input}'")))
}

fn parse_f64(input: &str) -> ImportResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| ImportError::InvalidData(format!("invalid number '{input}': {e}")))
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
