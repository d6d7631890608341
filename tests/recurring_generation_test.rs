use chrono::{Datelike, Duration, NaiveDate, Weekday};

use scrimhub_backend::scrim::recurring::{expand_occurrences, MAX_RECURRENCE_WEEKS};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn occurrence_count_matches_weekday_selection() {
    // 2025-06-02 is a Monday; four full weeks through Sunday 2025-06-29
    let start = d(2025, 6, 2);
    let end = d(2025, 6, 29);

    let mondays = expand_occurrences(start, &[Weekday::Mon], Some(end));
    assert_eq!(mondays.len(), 4);

    let mon_wed_fri =
        expand_occurrences(start, &[Weekday::Mon, Weekday::Wed, Weekday::Fri], Some(end));
    assert_eq!(mon_wed_fri.len(), 12);

    for date in &mon_wed_fri {
        assert!(matches!(
            date.weekday(),
            Weekday::Mon | Weekday::Wed | Weekday::Fri
        ));
    }
}

#[test]
fn occurrences_are_ordered_and_within_bounds() {
    let start = d(2025, 6, 4); // Wednesday
    let end = d(2025, 7, 16);
    let dates = expand_occurrences(start, &[Weekday::Wed, Weekday::Sat], Some(end));

    for window in dates.windows(2) {
        assert!(window[0] < window[1]);
    }
    assert!(dates.iter().all(|date| *date >= start && *date <= end));
}

#[test]
fn twelve_week_horizon_is_a_hard_cap() {
    let start = d(2025, 6, 2);
    let horizon = start + Duration::weeks(MAX_RECURRENCE_WEEKS);

    // An end date a year out generates no more than the open-ended horizon
    let dates = expand_occurrences(start, &[Weekday::Mon], Some(d(2026, 6, 1)));
    assert!(dates.iter().all(|date| *date <= horizon));
    assert_eq!(dates, expand_occurrences(start, &[Weekday::Mon], None));
}

#[test]
fn end_date_inside_horizon_wins() {
    let start = d(2025, 6, 2);
    let end = d(2025, 6, 15);
    let dates = expand_occurrences(start, &[Weekday::Sun], Some(end));
    assert_eq!(dates, vec![d(2025, 6, 8), d(2025, 6, 15)]);
}
