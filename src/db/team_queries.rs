use sqlx::PgPool;
use uuid::Uuid;

use crate::models::team::TeamMembership;

/// Resolve the caller's active team context. A user sits in at most one
/// active team at a time.
pub async fn get_active_membership(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<TeamMembership>, sqlx::Error> {
    sqlx::query_as::<_, TeamMembership>(
        r#"
        SELECT tm.team_id, t.team_name, tm.role
        FROM team_members tm
        INNER JOIN teams t ON tm.team_id = t.id
        WHERE tm.user_id = $1 AND tm.status = 'active'
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_team_name(pool: &PgPool, team_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT team_name FROM teams WHERE id = $1
        "#,
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await
}
