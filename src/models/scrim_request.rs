// src/models/scrim_request.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::scrim::ScrimFormat;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScrimRequestStatus {
    #[sqlx(rename = "pending")]
    Pending,
    #[sqlx(rename = "accepted")]
    Accepted,
    #[sqlx(rename = "rejected")]
    Rejected,
}

impl ScrimRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrimRequestStatus::Pending => "pending",
            ScrimRequestStatus::Accepted => "accepted",
            ScrimRequestStatus::Rejected => "rejected",
        }
    }
}

/// One team's expressed interest in a specific scrim. Proposing a scrim
/// also creates one of these for the host team itself — the system row
/// that marks the scrim open for matching.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ScrimRequest {
    pub id: Uuid,
    pub scrim_id: Uuid,
    pub requesting_team_id: Uuid,
    pub host_team_id: Uuid,
    pub status: ScrimRequestStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ScrimRequest {
    /// System row created alongside the proposal itself.
    pub fn is_self_request(&self) -> bool {
        self.requesting_team_id == self.host_team_id
    }
}

/// Request joined with requester name and scrim schedule, as rendered in
/// the host's "received requests" view.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ScrimRequestWithDetails {
    pub id: Uuid,
    pub scrim_id: Uuid,
    pub requesting_team_id: Uuid,
    pub requesting_team_name: String,
    pub host_team_id: Uuid,
    pub status: ScrimRequestStatus,
    pub message: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub format: ScrimFormat,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestScrimPayload {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RespondToRequestPayload {
    pub accept: bool,
}
