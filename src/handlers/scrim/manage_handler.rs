use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::scrim::{error_response, require_team};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scrim::CompleteScrimRequest;
use crate::scrim::ScrimLifecycleService;

/// Cancel a scrim owned by the caller's team.
#[tracing::instrument(
    name = "Cancel scrim",
    skip(pool, lifecycle, claims, scrim_id),
    fields(username = %claims.username, scrim_id = %scrim_id)
)]
pub async fn cancel_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
) -> HttpResponse {
    let (_, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match lifecycle.cancel_scrim(&team, scrim_id.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success_message(
            "Scrim cancelled successfully",
        )),
        Err(e) => error_response(e),
    }
}

/// Report the final result of a confirmed scrim.
#[tracing::instrument(
    name = "Complete scrim",
    skip(pool, lifecycle, claims, scrim_id, payload),
    fields(username = %claims.username, scrim_id = %scrim_id, final_score = %payload.final_score)
)]
pub async fn complete_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
    payload: web::Json<CompleteScrimRequest>,
) -> HttpResponse {
    let (_, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match lifecycle
        .complete_scrim(
            &team,
            scrim_id.into_inner(),
            &payload.final_score,
            &payload.matches,
        )
        .await
    {
        Ok(scrim) => HttpResponse::Ok().json(ApiResponse::success(
            "Scrim result recorded successfully",
            scrim,
        )),
        Err(e) => error_response(e),
    }
}

/// The team manager dashboard: proposed, received requests, completed
/// and upcoming scrims for the caller's team.
#[tracing::instrument(
    name = "Get my scrims",
    skip(pool, lifecycle, claims),
    fields(username = %claims.username)
)]
pub async fn my_scrims(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let (_, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match lifecycle.my_scrims(team.team_id).await {
        Ok(views) => HttpResponse::Ok().json(ApiResponse::success(
            "Scrims retrieved successfully",
            views,
        )),
        Err(e) => error_response(e),
    }
}
