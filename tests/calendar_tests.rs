use chrono::{NaiveDate, Weekday};
use completion_estimator::calendar::{
    InvalidCalendarError, WORKING_DAY_SEARCH_LIMIT, WorkCalendar, WorkCalendarConfig,
    is_working_day, weekday_from_index, weekday_index,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_calendar_has_sunday_off() {
    let cal = WorkCalendar::default();
    assert_eq!(cal.hours_per_day(), 8.0);
    assert_eq!(cal.days_per_week(), 5);
    // 2026-10-18 is a Sunday, 2026-10-17 a Saturday
    assert!(!cal.is_working_day(d(2026, 10, 18)));
    assert!(cal.is_working_day(d(2026, 10, 17)));
    assert_eq!(cal.working_days_per_week(), 6);
}

#[test]
fn custom_days_off_are_not_working() {
    let cal = WorkCalendar::new(8.0, &[], &[d(2026, 12, 24)]);
    assert!(!is_working_day(d(2026, 12, 24), &cal));
    assert!(is_working_day(d(2026, 12, 23), &cal));
}

#[test]
fn time_of_day_is_ignored() {
    let cal = WorkCalendar::new(8.0, &[], &[d(2026, 12, 24)]);
    let late_evening = d(2026, 12, 24).and_hms_opt(23, 59, 0).unwrap();
    let early_morning = d(2026, 12, 25).and_hms_opt(0, 1, 0).unwrap();
    assert!(!cal.is_working_instant(late_evening));
    assert!(cal.is_working_instant(early_morning));
}

#[test]
fn weekday_indices_start_on_sunday() {
    assert_eq!(weekday_from_index(0), Ok(Weekday::Sun));
    assert_eq!(weekday_from_index(6), Ok(Weekday::Sat));
    assert_eq!(
        weekday_from_index(7),
        Err(InvalidCalendarError::WeekdayIndexOutOfRange(7))
    );
    assert_eq!(weekday_index(Weekday::Mon), 1);
}

#[test]
fn config_round_trips_through_json_with_timestamps() {
    let json = r#"{
        "daysPerWeek": 5,
        "hoursPerDay": 7.5,
        "daysOff": [0, 6],
        "customDaysOff": ["2026-10-14T16:00:00Z", "2026-10-20"]
    }"#;
    let config: WorkCalendarConfig = serde_json::from_str(json).unwrap();
    let cal = WorkCalendar::from_config(&config).unwrap();

    assert_eq!(cal.hours_per_day(), 7.5);
    assert!(!cal.is_working_day(d(2026, 10, 14)));
    assert!(!cal.is_working_day(d(2026, 10, 20)));
    assert!(!cal.is_working_day(d(2026, 10, 17)));
    assert!(cal.is_working_day(d(2026, 10, 15)));

    let back = cal.to_config();
    assert_eq!(back.days_off, vec![0, 6]);
    assert_eq!(back.custom_days_off, vec![d(2026, 10, 14), d(2026, 10, 20)]);
}

#[test]
fn config_rejects_out_of_range_weekday() {
    let config = WorkCalendarConfig {
        days_per_week: 5,
        hours_per_day: 8.0,
        days_off: vec![0, 9],
        custom_days_off: Vec::new(),
    };
    assert_eq!(
        WorkCalendar::from_config(&config),
        Err(InvalidCalendarError::WeekdayIndexOutOfRange(9))
    );
}

#[test]
fn toggles_flip_state() {
    let mut cal = WorkCalendar::default();
    assert!(cal.toggle_day_off(Weekday::Sat));
    assert!(!cal.is_working_day(d(2026, 10, 17)));
    assert!(!cal.toggle_day_off(Weekday::Sat));
    assert!(cal.is_working_day(d(2026, 10, 17)));

    assert!(cal.toggle_custom_day_off(d(2026, 10, 16)));
    assert!(!cal.is_working_day(d(2026, 10, 16)));
    assert!(!cal.toggle_custom_day_off(d(2026, 10, 16)));
    assert!(cal.is_working_day(d(2026, 10, 16)));
}

#[test]
fn next_working_day_skips_weekend_and_holidays() {
    let cal = WorkCalendar::new(8.0, &[Weekday::Sat, Weekday::Sun], &[d(2026, 10, 19)]);
    // Saturday -> Monday is a holiday -> Tuesday
    assert_eq!(cal.next_working_day(d(2026, 10, 17)), Ok(d(2026, 10, 20)));
    // A working day is returned unchanged
    assert_eq!(cal.next_working_day(d(2026, 10, 16)), Ok(d(2026, 10, 16)));
}

#[test]
fn next_working_day_is_bounded_when_every_day_is_off() {
    let cal = WorkCalendar::new(8.0, &WorkCalendar::ALL_WEEKDAYS, &[]);
    assert_eq!(
        cal.next_working_day(d(2026, 10, 16)),
        Err(InvalidCalendarError::NoWorkingDays {
            from: d(2026, 10, 16),
            searched_days: WORKING_DAY_SEARCH_LIMIT,
        })
    );
}

#[test]
fn working_days_in_range_and_count_match() {
    let cal = WorkCalendar::new(8.0, &[Weekday::Sat, Weekday::Sun], &[]);
    let start = d(2026, 10, 12); // Mon
    let end = d(2026, 10, 25); // Sun, two weeks later
    let days = cal.working_days_in_range(start, end);
    assert_eq!(days.len(), 10);
    assert_eq!(cal.count_working_days(start, end), 10);
    assert_eq!(days.first().copied(), Some(start));
    assert_eq!(days.last().copied(), Some(d(2026, 10, 23)));
}

#[test]
fn validate_rejects_non_positive_hours() {
    let mut cal = WorkCalendar::default();
    cal.set_hours_per_day(0.0);
    assert_eq!(
        cal.validate(),
        Err(InvalidCalendarError::NonPositiveHoursPerDay(0.0))
    );
    cal.set_hours_per_day(-2.0);
    assert!(cal.validate().is_err());
    cal.set_hours_per_day(f64::NAN);
    assert!(cal.validate().is_err());
    cal.set_hours_per_day(6.0);
    assert!(cal.validate().is_ok());
}
