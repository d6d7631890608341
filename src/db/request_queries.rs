use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::models::scrim::Scrim;
use crate::models::scrim_request::{ScrimRequest, ScrimRequestStatus, ScrimRequestWithDetails};

const REQUEST_COLUMNS: &str =
    "id, scrim_id, requesting_team_id, host_team_id, status, message, created_at, responded_at";

/// Insert one request. The partial unique index on
/// (scrim_id, requesting_team_id) WHERE status = 'pending' rejects a second
/// active request from the same team; callers map that to the domain error.
pub async fn insert_request(
    pool: &PgPool,
    scrim_id: Uuid,
    requesting_team_id: Uuid,
    host_team_id: Uuid,
    message: Option<&str>,
) -> Result<ScrimRequest, sqlx::Error> {
    sqlx::query_as::<_, ScrimRequest>(&format!(
        r#"
        INSERT INTO scrim_requests (scrim_id, requesting_team_id, host_team_id, status, message)
        VALUES ($1, $2, $3, 'pending', $4)
        RETURNING {}
        "#,
        REQUEST_COLUMNS
    ))
    .bind(scrim_id)
    .bind(requesting_team_id)
    .bind(host_team_id)
    .bind(message)
    .fetch_one(pool)
    .await
}

/// Batch-insert the system self-requests for freshly proposed scrims
/// (requesting team = host team), one per scrim, in the same transaction
/// as the scrim rows themselves.
pub async fn create_self_requests(
    tx: &mut Transaction<'_, Postgres>,
    scrims: &[Scrim],
) -> Result<(), sqlx::Error> {
    if scrims.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO scrim_requests (scrim_id, requesting_team_id, host_team_id, status, message) ",
    );
    builder.push_values(scrims.iter(), |mut row, s| {
        row.push_bind(s.id)
            .push_bind(s.team_id)
            .push_bind(s.team_id)
            .push_bind("pending")
            .push_bind(Option::<String>::None);
    });

    builder.build().execute(&mut **tx).await?;
    Ok(())
}

pub async fn get_request(
    pool: &PgPool,
    request_id: Uuid,
) -> Result<Option<ScrimRequest>, sqlx::Error> {
    sqlx::query_as::<_, ScrimRequest>(&format!(
        "SELECT {} FROM scrim_requests WHERE id = $1",
        REQUEST_COLUMNS
    ))
    .bind(request_id)
    .fetch_optional(pool)
    .await
}

/// Conditional transition pending -> accepted/rejected. Zero rows affected
/// means the request was already resolved.
pub async fn set_status_if_pending(
    tx: &mut Transaction<'_, Postgres>,
    request_id: Uuid,
    status: ScrimRequestStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE scrim_requests
        SET status = $2, responded_at = NOW()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(request_id)
    .bind(status.as_str())
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Cancellation cascade: reject everything still pending against a scrim,
/// the system self-request included.
pub async fn reject_pending_for_scrim(
    tx: &mut Transaction<'_, Postgres>,
    scrim_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE scrim_requests
        SET status = 'rejected', responded_at = NOW()
        WHERE scrim_id = $1 AND status = 'pending'
        "#,
    )
    .bind(scrim_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Pending requests from other teams against this team's scrims, newest
/// first, as shown on the host dashboard.
pub async fn list_received(
    pool: &PgPool,
    team_id: Uuid,
) -> Result<Vec<ScrimRequestWithDetails>, sqlx::Error> {
    sqlx::query_as::<_, ScrimRequestWithDetails>(
        r#"
        SELECT sr.id, sr.scrim_id, sr.requesting_team_id, t.team_name AS requesting_team_name,
               sr.host_team_id, sr.status, sr.message, s.scheduled_date, s.scheduled_time,
               s.format, s.region, sr.created_at
        FROM scrim_requests sr
        INNER JOIN scrims s ON sr.scrim_id = s.id
        INNER JOIN teams t ON sr.requesting_team_id = t.id
        WHERE sr.host_team_id = $1
          AND sr.requesting_team_id <> $1
          AND sr.status = 'pending'
        ORDER BY sr.created_at DESC
        "#,
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}
