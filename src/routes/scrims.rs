// src/routes/scrims.rs
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::scrim::{manage_handler, propose_handler, request_handler, search_handler};
use crate::middleware::auth::Claims;
use crate::models::scrim::{CompleteScrimRequest, ProposeScrimRequest, SearchFilters};
use crate::models::scrim_request::{RequestScrimPayload, RespondToRequestPayload};
use crate::scrim::ScrimLifecycleService;

/// Propose a new scrim (single or recurring)
#[post("/propose")]
async fn propose_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    request: web::Json<ProposeScrimRequest>,
) -> Result<HttpResponse> {
    Ok(propose_handler::propose_scrim(pool, lifecycle, claims, request).await)
}

/// Browse open scrims across all teams
#[get("/search")]
async fn search_open_scrims(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    filters: web::Query<SearchFilters>,
) -> Result<HttpResponse> {
    Ok(search_handler::search_open_scrims(pool, lifecycle, claims, filters).await)
}

/// Dashboard views for the caller's team
#[get("/mine")]
async fn my_scrims(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    Ok(manage_handler::my_scrims(pool, lifecycle, claims).await)
}

/// Accept or reject a scrim request
#[post("/requests/{request_id}/respond")]
async fn respond_to_request(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    request_id: web::Path<Uuid>,
    payload: web::Json<RespondToRequestPayload>,
) -> Result<HttpResponse> {
    Ok(request_handler::respond_to_request(pool, lifecycle, claims, request_id, payload).await)
}

/// Get a single scrim
#[get("/{scrim_id}")]
async fn get_scrim(
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    Ok(search_handler::get_scrim(lifecycle, claims, scrim_id).await)
}

/// Request to play another team's open scrim
#[post("/{scrim_id}/request")]
async fn request_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
    payload: web::Json<RequestScrimPayload>,
) -> Result<HttpResponse> {
    Ok(request_handler::request_scrim(pool, lifecycle, claims, scrim_id, payload).await)
}

/// Cancel a scrim
#[post("/{scrim_id}/cancel")]
async fn cancel_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    Ok(manage_handler::cancel_scrim(pool, lifecycle, claims, scrim_id).await)
}

/// Record the final result of a confirmed scrim
#[post("/{scrim_id}/complete")]
async fn complete_scrim(
    pool: web::Data<PgPool>,
    lifecycle: web::Data<ScrimLifecycleService>,
    claims: web::ReqData<Claims>,
    scrim_id: web::Path<Uuid>,
    payload: web::Json<CompleteScrimRequest>,
) -> Result<HttpResponse> {
    Ok(manage_handler::complete_scrim(pool, lifecycle, claims, scrim_id, payload).await)
}
