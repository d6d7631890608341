use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::team_queries;
use crate::handlers::scrim::error_response;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scrim::SearchFilters;
use crate::scrim::ScrimLifecycleService;

/// Browse open scrims across all teams. Works without a team context;
/// with one, the caller's own scrims come back tagged.
#[tracing::instrument(
    name = "Search open scrims",
    skip(pool, lifecycle, claims, filters),
    fields(username = %claims.username)
)]
pub async fn search_open_scrims(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    filters: web::Query<SearchFilters>,
) -> HttpResponse {
    let own_team = match claims.user_id() {
        Some(user_id) => match team_queries::get_active_membership(pool.get_ref(), user_id).await {
            Ok(membership) => membership.map(|m| m.team_id),
            Err(e) => {
                tracing::error!("Database error resolving team for search: {}", e);
                None
            }
        },
        None => None,
    };

    match lifecycle.search(own_team, &filters).await {
        Ok(scrims) => {
            let total_count = scrims.len();
            HttpResponse::Ok().json(ApiResponse::success(
                "Open scrims retrieved successfully",
                serde_json::json!({
                    "scrims": scrims,
                    "total_count": total_count,
                }),
            ))
        }
        Err(e) => error_response(e),
    }
}

/// Fetch a single scrim by id.
#[tracing::instrument(
    name = "Get scrim",
    skip(lifecycle, claims, scrim_id),
    fields(username = %claims.username, scrim_id = %scrim_id)
)]
pub async fn get_scrim(
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
) -> HttpResponse {
    match lifecycle.get_scrim(scrim_id.into_inner()).await {
        Ok(scrim) => HttpResponse::Ok().json(ApiResponse::success(
            "Scrim retrieved successfully",
            scrim,
        )),
        Err(e) => error_response(e),
    }
}
