//! Parameter set API handlers
//!
//! POST /api/parameters, GET /api/parameters

use axum::{extract::State, routing::get, Json, Router};
use mpd_common::models::{NewParameterSet, ParameterSet};

use crate::{error::ApiResult, AppState};

/// POST /api/parameters
///
/// Validate and store a new parameter set. Returns the stored record.
pub async fn create_parameter_set(
    State(state): State<AppState>,
    Json(request): Json<NewParameterSet>,
) -> ApiResult<Json<ParameterSet>> {
    let params = state.pipeline.create_parameter_set(request).await?;
    Ok(Json(params))
}

/// GET /api/parameters
pub async fn list_parameter_sets(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ParameterSet>>> {
    let sets = state.pipeline.list_parameter_sets().await?;
    tracing::debug!(count = sets.len(), "Listed parameter sets");
    Ok(Json(sets))
}

/// Build parameter routes
pub fn parameter_routes() -> Router<AppState> {
    Router::new().route(
        "/api/parameters",
        get(list_parameter_sets).post(create_parameter_set),
    )
}
