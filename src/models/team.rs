// src/models/team.rs
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    #[sqlx(rename = "owner")]
    Owner,
    #[sqlx(rename = "admin")]
    Admin,
    #[sqlx(rename = "member")]
    Member,
}

/// The caller's active team context. Every scrim mutation is gated on this:
/// a user without an active membership cannot touch any scrim row.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamMembership {
    pub team_id: Uuid,
    pub team_name: String,
    pub role: TeamRole,
}
