use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::models::scrim::{FinalScore, MatchGame, NewScrim, OpenScrim, Scrim};

const SCRIM_COLUMNS: &str = "id, team_id, created_by, scheduled_date, scheduled_time, format, \
     region, game, opponent_name, opponent_team_id, opponent_level, status, score_home, \
     score_away, completed_at, matches, event_id, recurring_group_id, notes, created_at, updated_at";

/// Insert one or more scrim rows as a single batch statement. Recurring
/// siblings either all land or none do; callers wrap this in a transaction
/// together with the matching self-requests.
pub async fn create_scrims(
    tx: &mut Transaction<'_, Postgres>,
    scrims: &[NewScrim],
) -> Result<Vec<Scrim>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO scrims (id, team_id, created_by, scheduled_date, scheduled_time, format, \
         region, game, opponent_name, opponent_level, notes, recurring_group_id, status) ",
    );
    builder.push_values(scrims.iter(), |mut row, s| {
        row.push_bind(s.id)
            .push_bind(s.team_id)
            .push_bind(s.created_by)
            .push_bind(s.scheduled_date)
            .push_bind(s.scheduled_time)
            .push_bind(s.format)
            .push_bind(s.region.clone())
            .push_bind(s.game.clone())
            .push_bind(s.opponent_name.clone())
            .push_bind(s.opponent_level)
            .push_bind(s.notes.clone())
            .push_bind(s.recurring_group_id)
            .push_bind("pending");
    });
    builder.push(" RETURNING ");
    builder.push(SCRIM_COLUMNS);

    builder
        .build_query_as::<Scrim>()
        .fetch_all(&mut **tx)
        .await
}

pub async fn get_scrim(pool: &PgPool, scrim_id: Uuid) -> Result<Option<Scrim>, sqlx::Error> {
    sqlx::query_as::<_, Scrim>(&format!(
        "SELECT {} FROM scrims WHERE id = $1",
        SCRIM_COLUMNS
    ))
    .bind(scrim_id)
    .fetch_optional(pool)
    .await
}

/// Conditional transition pending -> confirmed, recording the matched
/// opponent. Zero rows affected means someone else got there first.
pub async fn confirm_scrim_if_pending(
    tx: &mut Transaction<'_, Postgres>,
    scrim_id: Uuid,
    opponent_team_id: Uuid,
    opponent_name: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE scrims
        SET status = 'confirmed', opponent_team_id = $2, opponent_name = $3, updated_at = NOW()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(scrim_id)
    .bind(opponent_team_id)
    .bind(opponent_name)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Conditional transition {pending, confirmed} -> cancelled.
pub async fn cancel_scrim_if_open(
    tx: &mut Transaction<'_, Postgres>,
    scrim_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE scrims
        SET status = 'cancelled', updated_at = NOW()
        WHERE id = $1 AND status IN ('pending', 'confirmed')
        "#,
    )
    .bind(scrim_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Conditional transition confirmed -> completed, storing the score pair
/// and the ordered per-game results.
pub async fn complete_scrim_if_confirmed(
    pool: &PgPool,
    scrim_id: Uuid,
    score: FinalScore,
    matches: &[MatchGame],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE scrims
        SET status = 'completed', score_home = $2, score_away = $3, matches = $4,
            completed_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = 'confirmed'
        "#,
    )
    .bind(scrim_id)
    .bind(score.home)
    .bind(score.away)
    .bind(Json(matches))
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Link a scrim to its companion calendar event.
pub async fn set_event_id(
    pool: &PgPool,
    scrim_id: Uuid,
    event_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE scrims SET event_id = $2, updated_at = NOW() WHERE id = $1")
        .bind(scrim_id)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// The cross-team discovery read: every pending scrim scheduled today or
/// later, regardless of who owns it.
pub async fn list_open_scrims(
    pool: &PgPool,
    today: NaiveDate,
) -> Result<Vec<OpenScrim>, sqlx::Error> {
    sqlx::query_as::<_, OpenScrim>(
        r#"
        SELECT s.id, s.team_id, t.team_name AS host_team_name, s.scheduled_date,
               s.scheduled_time, s.format, s.region, s.game, s.opponent_level,
               s.notes, s.created_at
        FROM scrims s
        INNER JOIN teams t ON s.team_id = t.id
        WHERE s.status = 'pending' AND s.scheduled_date >= $1
        ORDER BY s.scheduled_date ASC, s.scheduled_time ASC
        "#,
    )
    .bind(today)
    .fetch_all(pool)
    .await
}

pub async fn list_proposed(pool: &PgPool, team_id: Uuid) -> Result<Vec<Scrim>, sqlx::Error> {
    sqlx::query_as::<_, Scrim>(&format!(
        r#"
        SELECT {}
        FROM scrims
        WHERE team_id = $1 AND status = 'pending'
        ORDER BY scheduled_date ASC, scheduled_time ASC
        "#,
        SCRIM_COLUMNS
    ))
    .bind(team_id)
    .fetch_all(pool)
    .await
}

pub async fn list_upcoming(
    pool: &PgPool,
    team_id: Uuid,
    today: NaiveDate,
    limit: i64,
) -> Result<Vec<Scrim>, sqlx::Error> {
    sqlx::query_as::<_, Scrim>(&format!(
        r#"
        SELECT {}
        FROM scrims
        WHERE team_id = $1 AND status IN ('pending', 'confirmed') AND scheduled_date >= $2
        ORDER BY scheduled_date ASC, scheduled_time ASC
        LIMIT $3
        "#,
        SCRIM_COLUMNS
    ))
    .bind(team_id)
    .bind(today)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_completed(
    pool: &PgPool,
    team_id: Uuid,
    limit: i64,
) -> Result<Vec<Scrim>, sqlx::Error> {
    sqlx::query_as::<_, Scrim>(&format!(
        r#"
        SELECT {}
        FROM scrims
        WHERE team_id = $1 AND status = 'completed'
        ORDER BY scheduled_date DESC, scheduled_time DESC
        LIMIT $2
        "#,
        SCRIM_COLUMNS
    ))
    .bind(team_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
