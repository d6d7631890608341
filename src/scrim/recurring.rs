use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Recurring proposals never extend past this horizon, even when the
/// explicit end date is further out.
pub const MAX_RECURRENCE_WEEKS: i64 = 12;

/// Expand a recurring proposal into concrete dates: every date in
/// `[start, min(end, start + 12 weeks)]` whose weekday is selected.
/// The start date itself is included when its weekday matches.
pub fn expand_occurrences(
    start: NaiveDate,
    weekdays: &[Weekday],
    end: Option<NaiveDate>,
) -> Vec<NaiveDate> {
    let horizon = start + Duration::weeks(MAX_RECURRENCE_WEEKS);
    let last = match end {
        Some(end) if end < horizon => end,
        _ => horizon,
    };

    let mut dates = Vec::new();
    let mut current = start;
    while current <= last {
        if weekdays.contains(&current.weekday()) {
            dates.push(current);
        }
        current += Duration::days(1);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_weekday_within_explicit_end() {
        // 2025-06-02 is a Monday
        let start = date(2025, 6, 2);
        let end = date(2025, 6, 30);
        let dates = expand_occurrences(start, &[Weekday::Mon], Some(end));
        assert_eq!(
            dates,
            vec![
                date(2025, 6, 2),
                date(2025, 6, 9),
                date(2025, 6, 16),
                date(2025, 6, 23),
                date(2025, 6, 30),
            ]
        );
    }

    #[test]
    fn start_date_included_only_if_weekday_matches() {
        let start = date(2025, 6, 2); // Monday
        let dates = expand_occurrences(start, &[Weekday::Wed], Some(date(2025, 6, 11)));
        assert_eq!(dates, vec![date(2025, 6, 4), date(2025, 6, 11)]);
    }

    #[test]
    fn horizon_caps_open_ended_recurrence() {
        let start = date(2025, 6, 2); // Monday
        let dates = expand_occurrences(start, &[Weekday::Mon], None);
        // 12 weeks of Mondays, start inclusive
        assert_eq!(dates.len(), 13);
        assert_eq!(*dates.first().unwrap(), start);
        assert_eq!(*dates.last().unwrap(), start + Duration::weeks(12));
    }

    #[test]
    fn horizon_caps_end_date_beyond_twelve_weeks() {
        let start = date(2025, 6, 2);
        let far_end = date(2026, 6, 2);
        let capped = expand_occurrences(start, &[Weekday::Mon], Some(far_end));
        let open = expand_occurrences(start, &[Weekday::Mon], None);
        assert_eq!(capped, open);
    }

    #[test]
    fn multiple_weekdays_count() {
        let start = date(2025, 6, 2); // Monday
        let end = date(2025, 6, 8); // Sunday, one full week
        let dates = expand_occurrences(start, &[Weekday::Tue, Weekday::Thu], Some(end));
        assert_eq!(dates, vec![date(2025, 6, 3), date(2025, 6, 5)]);
    }

    #[test]
    fn no_weekdays_yields_no_dates() {
        let dates = expand_occurrences(date(2025, 6, 2), &[], Some(date(2025, 6, 30)));
        assert!(dates.is_empty());
    }
}
