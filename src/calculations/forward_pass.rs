use crate::calendar::WorkCalendar;
use crate::estimator::EstimationError;
use crate::job::Job;
use crate::schedule::ScheduleEntry;
use chrono::NaiveDate;
use tracing::debug;

use super::urgency::is_urgent;

/// Single-resource walk over working days.
///
/// Every job's date is found by walking the running total of queued hours
/// from the first working day, so each result depends only on that total and
/// never on how the hours were split between jobs.
pub struct CapacityWalk<'a> {
    calendar: &'a WorkCalendar,
    first_day: NaiveDate,
    queued_hours: f64,
}

impl<'a> CapacityWalk<'a> {
    pub fn start(calendar: &'a WorkCalendar, today: NaiveDate) -> Result<Self, EstimationError> {
        calendar.validate()?;
        let first_day = calendar.next_working_day(today)?;
        Ok(Self {
            calendar,
            first_day,
            queued_hours: 0.0,
        })
    }

    /// Working day the walk starts from.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn queued_hours(&self) -> f64 {
        self.queued_hours
    }

    /// Queue `hours` behind everything consumed so far and return the day the
    /// last of them is worked.
    pub fn consume(&mut self, hours: f64) -> Result<NaiveDate, EstimationError> {
        self.queued_hours += hours;
        self.day_for_total(self.queued_hours)
    }

    /// Day on which `total` hours, worked from the first day, are finished.
    pub fn day_for_total(&self, total: f64) -> Result<NaiveDate, EstimationError> {
        let hours_per_day = self.calendar.hours_per_day();
        let mut day = self.first_day;
        let mut outstanding = total;
        loop {
            outstanding -= outstanding.min(hours_per_day);
            if outstanding <= 0.0 {
                return Ok(day);
            }
            let next = day
                .succ_opt()
                .ok_or(EstimationError::DateOutOfRange { after: day })?;
            day = self.calendar.next_working_day(next)?;
        }
    }
}

pub struct ForwardPass<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> ForwardPass<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    /// Dates every job in the given (already prioritized) order.
    pub fn execute(
        &self,
        ordered: &[&Job],
        today: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, EstimationError> {
        let mut walk = CapacityWalk::start(self.calendar, today)?;
        let mut entries = Vec::with_capacity(ordered.len());

        for job in ordered {
            let remaining_hours = job.remaining_hours();
            let completion = walk.consume(remaining_hours)?;
            debug!(
                job_id = %job.id,
                %completion,
                remaining_hours,
                accumulated_hours = walk.queued_hours(),
                "scheduled job"
            );

            entries.push(ScheduleEntry {
                job_id: job.id.clone(),
                estimated_completion_date: completion,
                remaining_hours,
                is_urgent: is_urgent(job.deadline, completion),
                deadline: job.deadline,
                status: job.status,
            });
        }

        Ok(entries)
    }
}
