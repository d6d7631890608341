use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use scrimhub_backend::models::scrim::{OpponentLevel, ProposeScrimRequest, ScrimFormat};
use scrimhub_backend::scrim::validation::ScrimValidator;
use scrimhub_backend::scrim::ScrimError;

fn fixed_now() -> chrono::DateTime<Utc> {
    // Monday 2025-06-02, 16:00 UTC
    Utc.with_ymd_and_hms(2025, 6, 2, 16, 0, 0).unwrap()
}

fn proposal(date: NaiveDate, time: NaiveTime) -> ProposeScrimRequest {
    ProposeScrimRequest {
        scheduled_date: date,
        scheduled_time: time,
        format: ScrimFormat::Bo3,
        region: "euw".to_string(),
        game: "lol".to_string(),
        opponent_name: None,
        opponent_level: Some(OpponentLevel::Diamond),
        notes: None,
        is_recurring: false,
        recurring_weekdays: vec![],
        recurring_end_date: None,
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

#[test]
fn future_date_passes() {
    let validator = ScrimValidator::new();
    let request = proposal(d(2025, 6, 3), t(18, 0));
    assert!(validator.validate_proposal(&request, fixed_now()).is_ok());
}

#[test]
fn past_date_fails() {
    let validator = ScrimValidator::new();
    let request = proposal(d(2025, 6, 1), t(18, 0));
    assert!(matches!(
        validator.validate_proposal(&request, fixed_now()),
        Err(ScrimError::Validation(_))
    ));
}

#[test]
fn same_day_future_time_passes() {
    let validator = ScrimValidator::new();
    let request = proposal(d(2025, 6, 2), t(18, 0));
    assert!(validator.validate_proposal(&request, fixed_now()).is_ok());
}

#[test]
fn same_day_time_at_or_before_now_fails() {
    let validator = ScrimValidator::new();

    let at_now = proposal(d(2025, 6, 2), t(16, 0));
    assert!(validator.validate_proposal(&at_now, fixed_now()).is_err());

    let earlier = proposal(d(2025, 6, 2), t(12, 0));
    assert!(validator.validate_proposal(&earlier, fixed_now()).is_err());
}

#[test]
fn missing_region_or_game_fails() {
    let validator = ScrimValidator::new();

    let mut request = proposal(d(2025, 6, 3), t(18, 0));
    request.region = "  ".to_string();
    assert!(validator.validate_proposal(&request, fixed_now()).is_err());

    let mut request = proposal(d(2025, 6, 3), t(18, 0));
    request.game = String::new();
    assert!(validator.validate_proposal(&request, fixed_now()).is_err());
}

#[test]
fn recurring_needs_at_least_one_weekday() {
    let validator = ScrimValidator::new();
    let mut request = proposal(d(2025, 6, 3), t(18, 0));
    request.is_recurring = true;
    request.recurring_weekdays = vec![];
    assert!(validator.validate_proposal(&request, fixed_now()).is_err());

    request.recurring_weekdays = vec![Weekday::Tue];
    assert!(validator.validate_proposal(&request, fixed_now()).is_ok());
}

#[test]
fn recurring_end_date_must_follow_start() {
    let validator = ScrimValidator::new();
    let mut request = proposal(d(2025, 6, 3), t(18, 0));
    request.is_recurring = true;
    request.recurring_weekdays = vec![Weekday::Tue];

    request.recurring_end_date = Some(d(2025, 6, 3));
    assert!(validator.validate_proposal(&request, fixed_now()).is_err());

    request.recurring_end_date = Some(d(2025, 6, 2));
    assert!(validator.validate_proposal(&request, fixed_now()).is_err());

    request.recurring_end_date = Some(d(2025, 6, 24));
    assert!(validator.validate_proposal(&request, fixed_now()).is_ok());
}

#[test]
fn final_score_parsing() {
    let validator = ScrimValidator::new();

    let score = validator.validate_final_score("2-1").unwrap();
    assert_eq!(score.home, 2);
    assert_eq!(score.away, 1);
    assert_eq!(score.to_string(), "2-1");

    // A genuine 0-0 is a valid played result
    assert!(validator.validate_final_score("0-0").is_ok());
    assert!(validator.validate_final_score(" 3 - 2 ").is_ok());

    assert!(validator.validate_final_score("2:1").is_err());
    assert!(validator.validate_final_score("-1-2").is_err());
    assert!(validator.validate_final_score("two-one").is_err());
    assert!(validator.validate_final_score("").is_err());
}

#[test]
fn validation_happens_relative_to_injected_clock() {
    let validator = ScrimValidator::new();
    let request = proposal(d(2025, 6, 2), t(18, 0));

    // Same proposal, evaluated a day later, is now in the past
    let later = fixed_now() + Duration::days(1);
    assert!(validator.validate_proposal(&request, fixed_now()).is_ok());
    assert!(validator.validate_proposal(&request, later).is_err());
}
