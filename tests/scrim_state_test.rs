use std::str::FromStr;

use uuid::Uuid;

use scrimhub_backend::models::scrim::{FinalScore, MatchGame, MatchWinner, ScrimStatus};
use scrimhub_backend::scrim::lifecycle::ensure_not_self_request;
use scrimhub_backend::scrim::ScrimError;

#[test]
fn status_transitions_follow_the_lifecycle() {
    use ScrimStatus::*;

    // The only legal moves
    assert!(Pending.can_transition(Confirmed));
    assert!(Pending.can_transition(Cancelled));
    assert!(Confirmed.can_transition(Completed));
    assert!(Confirmed.can_transition(Cancelled));

    // No skipping ahead
    assert!(!Pending.can_transition(Completed));

    // No backward moves
    assert!(!Confirmed.can_transition(Pending));
    assert!(!Completed.can_transition(Pending));
    assert!(!Completed.can_transition(Confirmed));
    assert!(!Cancelled.can_transition(Pending));

    // Terminal states go nowhere
    for next in [Pending, Confirmed, Completed, Cancelled] {
        assert!(!Completed.can_transition(next));
        assert!(!Cancelled.can_transition(next));
    }

    // No self-loops
    for status in [Pending, Confirmed, Completed, Cancelled] {
        assert!(!status.can_transition(status));
    }
}

#[test]
fn requesting_own_scrim_is_rejected() {
    let team = Uuid::new_v4();
    let other = Uuid::new_v4();

    assert!(matches!(
        ensure_not_self_request(team, team),
        Err(ScrimError::SelfRequest)
    ));
    assert!(ensure_not_self_request(team, other).is_ok());
}

#[test]
fn final_score_round_trips() {
    let score = FinalScore::from_str("13-9").unwrap();
    assert_eq!(score.to_string(), "13-9");

    let draw = FinalScore::from_str("0-0").unwrap();
    assert_eq!((draw.home, draw.away), (0, 0));
}

#[test]
fn match_list_serializes_in_order() {
    let matches = vec![
        MatchGame {
            game_number: 1,
            winner: MatchWinner::Host,
        },
        MatchGame {
            game_number: 2,
            winner: MatchWinner::Opponent,
        },
        MatchGame {
            game_number: 3,
            winner: MatchWinner::Host,
        },
    ];

    let json = serde_json::to_string(&matches).unwrap();
    let back: Vec<MatchGame> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, matches);
    assert_eq!(back[0].game_number, 1);
    assert_eq!(back[2].winner, MatchWinner::Host);
}

#[test]
fn error_messages_distinguish_the_failure_modes() {
    let duplicate = ScrimError::DuplicateRequest.to_string();
    let missing = ScrimError::NotFound("Scrim").to_string();
    let retry = ScrimError::AlreadyHandled.to_string();

    assert_ne!(duplicate, missing);
    assert_ne!(duplicate, retry);
    assert_ne!(missing, retry);
    assert!(duplicate.contains("already requested"));
    assert!(missing.contains("not found"));
}
