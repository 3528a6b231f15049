//! Dashboard summary API handler
//!
//! GET /api/dashboard/:id/summary

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use mpd_common::uuid_utils;

use crate::{
    error::ApiResult,
    summary::{self, SummaryView},
    AppState,
};

/// GET /api/dashboard/:id/summary
///
/// Read-only: artifacts not yet generated are reported as null.
pub async fn dashboard_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SummaryView>> {
    let parameter_id = uuid_utils::parse_parameter_id(&id)?;
    let view = summary::summarize(&state.db, parameter_id).await?;
    Ok(Json(view))
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/dashboard/:id/summary", get(dashboard_summary))
}
