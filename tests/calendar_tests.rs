use chrono::{Datelike, NaiveDate, Weekday};
use workforce_tool::calendar::WorkCalendar;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn weekends_are_not_workdays() {
    let cal = WorkCalendar::default();
    // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
    assert!(!cal.is_workday(d(2024, 1, 6)));
    assert!(!cal.is_workday(d(2024, 1, 7)));
}

#[test]
fn weekdays_are_workdays() {
    let cal = WorkCalendar::default();
    for offset in 0..5 {
        let date = d(2024, 1, 1) + chrono::Duration::days(offset);
        assert!(cal.is_workday(date), "{date} should be a workday");
    }
}

#[test]
fn advance_workdays_counts_only_workdays() {
    let cal = WorkCalendar::default();
    let mon = d(2024, 1, 1);
    assert_eq!(mon.weekday(), Weekday::Mon);
    // 4 working days ahead of Monday lands on Friday of the same week
    assert_eq!(cal.advance_workdays(mon, 4), d(2024, 1, 5));
}

#[test]
fn advance_workdays_steps_over_the_weekend() {
    let cal = WorkCalendar::default();
    let fri = d(2024, 1, 5);
    assert_eq!(fri.weekday(), Weekday::Fri);
    assert_eq!(cal.advance_workdays(fri, 1), d(2024, 1, 8));
}

#[test]
fn advance_zero_days_is_identity_even_on_a_weekend() {
    let cal = WorkCalendar::default();
    let sat = d(2024, 1, 6);
    // The start date is never weekend-checked
    assert_eq!(cal.advance_workdays(sat, 0), sat);
}

#[test]
fn advance_from_saturday_skips_sunday() {
    let cal = WorkCalendar::default();
    let sat = d(2024, 1, 6);
    assert_eq!(cal.advance_workdays(sat, 1), d(2024, 1, 8));
}
