use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::scrim::{OpenScrim, ScrimSort, SearchFilters};

/// Open scrims are filtered and sorted after the fetch: the open set is
/// small and the filters mirror what the search screen applies locally.
pub fn apply_filters(
    mut scrims: Vec<OpenScrim>,
    filters: &SearchFilters,
    own_team: Option<Uuid>,
    now: DateTime<Utc>,
) -> Vec<OpenScrim> {
    for scrim in scrims.iter_mut() {
        scrim.is_own = own_team == Some(scrim.team_id);
        scrim.available_soon = is_available_soon(scrim, now);
    }

    scrims.retain(|s| {
        if let Some(date) = filters.date {
            if s.scheduled_date != date {
                return false;
            }
        }
        if let Some(from) = filters.time_from {
            if s.scheduled_time < from {
                return false;
            }
        }
        if let Some(to) = filters.time_to {
            if s.scheduled_time > to {
                return false;
            }
        }
        if let Some(region) = &filters.region {
            if !s.region.eq_ignore_ascii_case(region) {
                return false;
            }
        }
        if let Some(format) = filters.format {
            if s.format != format {
                return false;
            }
        }
        if filters.available_soon && !s.available_soon {
            return false;
        }
        true
    });

    sort_scrims(&mut scrims, filters.sort);
    scrims
}

/// Starts within the next two hours (and has not started yet).
fn is_available_soon(scrim: &OpenScrim, now: DateTime<Utc>) -> bool {
    let delta = scrim.scheduled_datetime() - now;
    delta >= Duration::zero() && delta <= Duration::hours(2)
}

pub fn sort_scrims(scrims: &mut [OpenScrim], sort: ScrimSort) {
    match sort {
        ScrimSort::DateTime => {
            scrims.sort_by_key(|s| (s.scheduled_date, s.scheduled_time));
        }
        ScrimSort::OpponentLevel => {
            // Strongest first; scrims without a declared level sort last
            scrims.sort_by(|a, b| {
                let rank = |s: &OpenScrim| s.opponent_level.map(|l| l.rank());
                rank(b).cmp(&rank(a))
            });
        }
        ScrimSort::Region => {
            scrims.sort_by(|a, b| a.region.cmp(&b.region));
        }
        ScrimSort::Newest => {
            scrims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scrim::{OpponentLevel, ScrimFormat};
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn open_scrim(date: NaiveDate, time: NaiveTime) -> OpenScrim {
        OpenScrim {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            host_team_name: "Host".into(),
            scheduled_date: date,
            scheduled_time: time,
            format: ScrimFormat::Bo3,
            region: "euw".into(),
            game: "lol".into(),
            opponent_level: None,
            notes: None,
            created_at: Utc::now(),
            is_own: false,
            available_soon: false,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn available_soon_window_is_zero_to_two_hours() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 16, 0, 0).unwrap();

        let in_window = open_scrim(d(2025, 6, 2), t(17, 30));
        let at_edge = open_scrim(d(2025, 6, 2), t(18, 0));
        let too_late = open_scrim(d(2025, 6, 2), t(18, 1));
        let started = open_scrim(d(2025, 6, 2), t(15, 59));

        assert!(is_available_soon(&in_window, now));
        assert!(is_available_soon(&at_edge, now));
        assert!(!is_available_soon(&too_late, now));
        assert!(!is_available_soon(&started, now));
    }

    #[test]
    fn own_scrims_are_tagged_not_hidden() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let mine = open_scrim(d(2025, 6, 3), t(18, 0));
        let own_team = mine.team_id;
        let other = open_scrim(d(2025, 6, 3), t(19, 0));

        let result = apply_filters(
            vec![mine, other],
            &SearchFilters::default(),
            Some(own_team),
            now,
        );
        assert_eq!(result.len(), 2);
        assert!(result.iter().any(|s| s.is_own));
        assert!(result.iter().any(|s| !s.is_own));
    }

    #[test]
    fn filters_by_date_time_window_region_and_format() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let mut a = open_scrim(d(2025, 6, 3), t(18, 0));
        a.region = "euw".into();
        let mut b = open_scrim(d(2025, 6, 3), t(22, 0));
        b.region = "na".into();
        let c = open_scrim(d(2025, 6, 4), t(18, 0));

        let filters = SearchFilters {
            date: Some(d(2025, 6, 3)),
            time_from: Some(t(17, 0)),
            time_to: Some(t(20, 0)),
            region: Some("EUW".into()),
            ..Default::default()
        };
        let result = apply_filters(vec![a.clone(), b, c], &filters, None, now);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, a.id);
    }

    #[test]
    fn level_sort_is_strongest_first_with_unranked_last() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let mut gold = open_scrim(d(2025, 6, 3), t(18, 0));
        gold.opponent_level = Some(OpponentLevel::Gold);
        let mut challenger = open_scrim(d(2025, 6, 3), t(19, 0));
        challenger.opponent_level = Some(OpponentLevel::Challenger);
        let unranked = open_scrim(d(2025, 6, 3), t(20, 0));

        let filters = SearchFilters {
            sort: ScrimSort::OpponentLevel,
            ..Default::default()
        };
        let result = apply_filters(vec![gold, unranked.clone(), challenger.clone()], &filters, None, now);
        assert_eq!(result[0].id, challenger.id);
        assert_eq!(result[2].id, unranked.id);
    }

    #[test]
    fn default_sort_is_soonest_first() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let later = open_scrim(d(2025, 6, 4), t(10, 0));
        let sooner = open_scrim(d(2025, 6, 3), t(18, 0));
        let same_day_later = open_scrim(d(2025, 6, 3), t(21, 0));

        let result = apply_filters(
            vec![later.clone(), same_day_later.clone(), sooner.clone()],
            &SearchFilters::default(),
            None,
            now,
        );
        assert_eq!(result[0].id, sooner.id);
        assert_eq!(result[1].id, same_day_later.id);
        assert_eq!(result[2].id, later.id);
    }
}
