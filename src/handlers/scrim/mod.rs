pub mod manage_handler;
pub mod propose_handler;
pub mod request_handler;
pub mod search_handler;

use actix_web::HttpResponse;
use sqlx::PgPool;

use crate::db::team_queries;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::team::TeamMembership;
use crate::scrim::ScrimError;

/// Map a lifecycle failure to the HTTP surface. Messages come from the
/// error taxonomy itself so the UI can tell the cases apart.
pub(crate) fn error_response(err: ScrimError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ScrimError::Validation(_) | ScrimError::SelfRequest => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
        ScrimError::NotFound(_) => HttpResponse::NotFound().json(ApiResponse::<()>::error(message)),
        ScrimError::DuplicateRequest | ScrimError::AlreadyHandled => {
            HttpResponse::Conflict().json(ApiResponse::<()>::error(message))
        }
        ScrimError::Forbidden(_) => {
            HttpResponse::Forbidden().json(ApiResponse::<()>::error(message))
        }
        ScrimError::Store(e) => {
            tracing::error!("Store error during scrim operation: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(message))
        }
    }
}

/// Resolve the caller's active team or short-circuit with the right
/// response. Every scrim mutation starts here.
pub(crate) async fn require_team(
    pool: &PgPool,
    claims: &Claims,
) -> Result<(uuid::Uuid, TeamMembership), HttpResponse> {
    let user_id = claims.user_id().ok_or_else(|| {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid user ID"))
    })?;

    match team_queries::get_active_membership(pool, user_id).await {
        Ok(Some(membership)) => Ok((user_id, membership)),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "You must belong to a team to manage scrims",
        ))),
        Err(e) => {
            tracing::error!("Database error checking team membership: {}", e);
            Err(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to verify team membership")))
        }
    }
}
