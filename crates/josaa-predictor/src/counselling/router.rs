use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::catalog;
use super::domain::CollegeType;
use super::service::{CutoffRepository, PredictionOutcome, PreferenceService};
use super::validation::PredictionRequest;
use crate::error::AppError;

/// Router builder exposing the prediction and option-list endpoints.
pub fn preference_router<R>(service: Arc<PreferenceService<R>>) -> Router
where
    R: CutoffRepository + 'static,
{
    Router::new()
        .route("/api/predict", post(predict_handler::<R>))
        .route("/api/branches", get(branches_handler::<R>))
        .route("/api/health", get(health_handler::<R>))
        .route("/api/categories", get(categories_handler))
        .route("/api/college-types", get(college_types_handler))
        .route("/api/rounds", get(rounds_handler))
        .route("/api/genders", get(genders_handler))
        .route("/api/quotas/:college_type", get(quotas_handler))
        .with_state(service)
}

/// Service failures surface as [`AppError`], which picks the status code.
pub(crate) async fn predict_handler<R>(
    State(service): State<Arc<PreferenceService<R>>>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionOutcome>, AppError>
where
    R: CutoffRepository + 'static,
{
    let outcome = service.predict(&request)?;
    Ok(Json(outcome))
}

pub(crate) async fn branches_handler<R>(
    State(service): State<Arc<PreferenceService<R>>>,
) -> Result<Json<serde_json::Value>, AppError>
where
    R: CutoffRepository + 'static,
{
    let branches = service.branches()?;
    Ok(Json(json!({ "branches": branches })))
}

pub(crate) async fn health_handler<R>(State(service): State<Arc<PreferenceService<R>>>) -> Response
where
    R: CutoffRepository + 'static,
{
    let timestamp = Utc::now().to_rfc3339();
    let payload = match service.health() {
        Ok(health) => json!({
            "status": "healthy",
            "data_loaded": health.data_loaded,
            "seat_count": health.seat_count,
            "timestamp": timestamp,
        }),
        Err(error) => json!({
            "status": "unhealthy",
            "error": error.to_string(),
            "timestamp": timestamp,
        }),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

async fn categories_handler() -> Json<serde_json::Value> {
    Json(json!({ "categories": catalog::categories() }))
}

async fn college_types_handler() -> Json<serde_json::Value> {
    Json(json!({ "college_types": catalog::college_types() }))
}

async fn rounds_handler() -> Json<serde_json::Value> {
    Json(json!({ "rounds": catalog::rounds() }))
}

async fn genders_handler() -> Json<serde_json::Value> {
    Json(json!({ "genders": catalog::genders() }))
}

pub(crate) async fn quotas_handler(Path(college_type): Path<String>) -> Response {
    if college_type.eq_ignore_ascii_case(catalog::COLLEGE_TYPE_WILDCARD) {
        return (StatusCode::OK, Json(json!({ "quotas": catalog::all_quotas() }))).into_response();
    }

    match CollegeType::parse(&college_type) {
        Ok(kind) => (StatusCode::OK, Json(json!({ "quotas": catalog::quotas_for(kind) }))).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
