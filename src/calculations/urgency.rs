use crate::schedule::ScheduleEntry;
use chrono::NaiveDate;

/// A job is urgent when it is projected to finish strictly after its deadline.
pub fn is_urgent(deadline: Option<NaiveDate>, completion: NaiveDate) -> bool {
    deadline.is_some_and(|deadline| completion > deadline)
}

/// Reorders forward-pass output for presentation.
///
/// Urgent entries come first, soonest deadline first; the rest follow by
/// projected completion. Both sorts are stable, so simulation order breaks
/// any remaining ties.
pub fn presentation_order(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let (mut urgent, mut on_track): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|entry| entry.is_urgent);

    urgent.sort_by(|a, b| {
        a.deadline
            .cmp(&b.deadline)
            .then_with(|| a.estimated_completion_date.cmp(&b.estimated_completion_date))
    });
    on_track.sort_by_key(|entry| entry.estimated_completion_date);

    urgent.extend(on_track);
    urgent
}
