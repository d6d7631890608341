use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Event data handed to the team planning subsystem.
#[derive(Debug, Clone)]
pub struct NewCalendarEvent {
    pub team_id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// The calendar/planning collaborator. Scrim operations call it
/// best-effort: a failure here is logged by the caller and never fails
/// the scrim write itself.
#[derive(Clone, Debug)]
pub struct CalendarService {
    pool: PgPool,
}

impl CalendarService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_event(&self, event: NewCalendarEvent) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO calendar_events (team_id, title, start_time, end_time, description, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(event.team_id)
        .bind(event.title)
        .bind(event.start)
        .bind(event.end)
        .bind(event.description)
        .bind(event.location)
        .fetch_one(&self.pool)
        .await
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update_event(
        &self,
        event_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE calendar_events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .bind(title)
        .bind(description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
