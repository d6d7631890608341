// src/models/scrim.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::scrim_request::ScrimRequestWithDetails;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScrimStatus {
    #[sqlx(rename = "pending")]
    Pending,
    #[sqlx(rename = "confirmed")]
    Confirmed,
    #[sqlx(rename = "completed")]
    Completed,
    #[sqlx(rename = "cancelled")]
    Cancelled,
}

impl ScrimStatus {
    /// The full lifecycle is pending -> confirmed -> completed, with
    /// cancellation allowed from pending or confirmed. No backward moves,
    /// no skipping straight from pending to completed.
    pub fn can_transition(self, next: ScrimStatus) -> bool {
        use ScrimStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScrimStatus::Pending => "pending",
            ScrimStatus::Confirmed => "confirmed",
            ScrimStatus::Completed => "completed",
            ScrimStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScrimFormat {
    #[sqlx(rename = "bo1")]
    Bo1,
    #[sqlx(rename = "bo2")]
    Bo2,
    #[sqlx(rename = "bo3")]
    Bo3,
    #[sqlx(rename = "bo5")]
    Bo5,
    #[sqlx(rename = "custom")]
    Custom,
}

/// Desired opponent level. Ordered weakest to strongest; `rank` backs the
/// level sort in open-scrim search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OpponentLevel {
    #[sqlx(rename = "bronze")]
    Bronze,
    #[sqlx(rename = "silver")]
    Silver,
    #[sqlx(rename = "gold")]
    Gold,
    #[sqlx(rename = "platinum")]
    Platinum,
    #[sqlx(rename = "diamond")]
    Diamond,
    #[sqlx(rename = "master")]
    Master,
    #[sqlx(rename = "grandmaster")]
    Grandmaster,
    #[sqlx(rename = "challenger")]
    Challenger,
}

impl OpponentLevel {
    pub fn rank(&self) -> u8 {
        match self {
            OpponentLevel::Bronze => 0,
            OpponentLevel::Silver => 1,
            OpponentLevel::Gold => 2,
            OpponentLevel::Platinum => 3,
            OpponentLevel::Diamond => 4,
            OpponentLevel::Master => 5,
            OpponentLevel::Grandmaster => 6,
            OpponentLevel::Challenger => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    Host,
    Opponent,
    Draw,
}

/// One game inside a scrim, recorded on completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchGame {
    pub game_number: i32,
    pub winner: MatchWinner,
}

/// Final score of a played scrim, rendered as "A-B" on the wire.
/// A scrim that has not been played has no score at all; a genuine 0-0
/// draw is `FinalScore { home: 0, away: 0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub home: i32,
    pub away: i32,
}

impl FromStr for FinalScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (home, away) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected \"A-B\", got \"{}\"", s))?;
        let home: i32 = home
            .trim()
            .parse()
            .map_err(|_| format!("invalid home score in \"{}\"", s))?;
        let away: i32 = away
            .trim()
            .parse()
            .map_err(|_| format!("invalid away score in \"{}\"", s))?;
        if home < 0 || away < 0 {
            return Err("scores cannot be negative".to_string());
        }
        Ok(FinalScore { home, away })
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Scrim {
    pub id: Uuid,
    pub team_id: Uuid,
    pub created_by: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub format: ScrimFormat,
    pub region: String,
    pub game: String,
    pub opponent_name: Option<String>,
    pub opponent_team_id: Option<Uuid>,
    pub opponent_level: Option<OpponentLevel>,
    pub status: ScrimStatus,
    pub score_home: Option<i32>,
    pub score_away: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub matches: Json<Vec<MatchGame>>,
    pub event_id: Option<Uuid>,
    pub recurring_group_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scrim {
    pub fn scheduled_datetime(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.scheduled_date.and_time(self.scheduled_time), Utc)
    }
}

/// Columns for a scrim row about to be inserted. Ids are generated up front
/// so recurring siblings and their self-requests can reference each other
/// inside one transaction.
#[derive(Debug, Clone)]
pub struct NewScrim {
    pub id: Uuid,
    pub team_id: Uuid,
    pub created_by: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub format: ScrimFormat,
    pub region: String,
    pub game: String,
    pub opponent_name: Option<String>,
    pub opponent_level: Option<OpponentLevel>,
    pub notes: Option<String>,
    pub recurring_group_id: Option<Uuid>,
}

/// Request to propose a scrim (single or recurring)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProposeScrimRequest {
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub format: ScrimFormat,
    pub region: String,
    pub game: String,
    pub opponent_name: Option<String>,
    pub opponent_level: Option<OpponentLevel>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_weekdays: Vec<Weekday>,
    pub recurring_end_date: Option<NaiveDate>,
}

/// An open scrim as seen in the cross-team search surface. `is_own` and
/// `available_soon` are computed per caller, not stored.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct OpenScrim {
    pub id: Uuid,
    pub team_id: Uuid,
    pub host_team_name: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub format: ScrimFormat,
    pub region: String,
    pub game: String,
    pub opponent_level: Option<OpponentLevel>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub is_own: bool,
    #[sqlx(default)]
    pub available_soon: bool,
}

impl OpenScrim {
    pub fn scheduled_datetime(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.scheduled_date.and_time(self.scheduled_time), Utc)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrimSort {
    /// Date then time, soonest first
    #[default]
    DateTime,
    /// Strongest declared opponent level first
    OpponentLevel,
    /// Region, lexicographic
    Region,
    /// Most recently created first
    Newest,
}

/// Query filters for the open-scrim search. All filters are optional and
/// applied client-side over the fetched open set.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchFilters {
    pub date: Option<NaiveDate>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub region: Option<String>,
    pub format: Option<ScrimFormat>,
    #[serde(default)]
    pub available_soon: bool,
    #[serde(default)]
    pub sort: ScrimSort,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteScrimRequest {
    pub final_score: String,
    #[serde(default)]
    pub matches: Vec<MatchGame>,
}

/// The "my scrims" dashboard: the four derived views consumed by the
/// team manager screens.
#[derive(Debug, Serialize, Deserialize)]
pub struct MyScrimsResponse {
    pub proposed: Vec<Scrim>,
    pub received_requests: Vec<ScrimRequestWithDetails>,
    pub completed: Vec<Scrim>,
    pub upcoming: Vec<Scrim>,
}
