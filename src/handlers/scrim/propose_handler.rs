use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::scrim::{error_response, require_team};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scrim::ProposeScrimRequest;
use crate::scrim::ScrimLifecycleService;

/// Propose a scrim (single or recurring) on behalf of the caller's team.
#[tracing::instrument(
    name = "Propose scrim",
    skip(pool, lifecycle, claims, request),
    fields(username = %claims.username, recurring = %request.is_recurring)
)]
pub async fn propose_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    request: web::Json<ProposeScrimRequest>,
) -> HttpResponse {
    let (user_id, team) = match require_team(pool.get_ref(), &claims).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match lifecycle
        .propose(user_id, &team, request.into_inner())
        .await
    {
        Ok(scrims) => {
            let message = if scrims.len() == 1 {
                "Scrim proposed successfully".to_string()
            } else {
                format!("{} recurring scrims proposed successfully", scrims.len())
            };
            HttpResponse::Created().json(ApiResponse::success(
                message,
                serde_json::json!({ "scrims": scrims }),
            ))
        }
        Err(e) => error_response(e),
    }
}
