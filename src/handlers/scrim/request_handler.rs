use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::scrim::{error_response, require_team};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scrim_request::{RequestScrimPayload, RespondToRequestPayload};
use crate::scrim::ScrimLifecycleService;

/// Express interest in another team's open scrim.
#[tracing::instrument(
    name = "Request scrim",
    skip(pool, lifecycle, claims, scrim_id, payload),
    fields(username = %claims.username, scrim_id = %scrim_id)
)]
pub async fn request_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
    payload: web::Json<RequestScrimPayload>,
) -> HttpResponse {
    let (_, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match lifecycle
        .request_scrim(&team, scrim_id.into_inner(), payload.message.as_deref())
        .await
    {
        Ok(request) => HttpResponse::Created().json(ApiResponse::success(
            "Scrim request sent successfully",
            serde_json::json!({ "request_id": request.id }),
        )),
        Err(e) => error_response(e),
    }
}

/// Respond to a scrim request (accept or reject).
#[tracing::instrument(
    name = "Respond to scrim request",
    skip(pool, lifecycle, claims, request_id, payload),
    fields(username = %claims.username, request_id = %request_id, accept = %payload.accept)
)]
pub async fn respond_to_request(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    request_id: web::Path<Uuid>,
    payload: web::Json<RespondToRequestPayload>,
) -> HttpResponse {
    let (_, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    let request_id = request_id.into_inner();
    let result = if payload.accept {
        lifecycle.accept_request(&team, request_id).await
    } else {
        lifecycle.reject_request(&team, request_id).await
    };

    match result {
        Ok(()) => {
            let action = if payload.accept { "accepted" } else { "rejected" };
            HttpResponse::Ok().json(ApiResponse::<()>::success_message(format!(
                "Request {} successfully",
                action
            )))
        }
        Err(e) => error_response(e),
    }
}
