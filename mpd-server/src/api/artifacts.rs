//! Artifact API handlers
//!
//! GET  /api/parameters/:id/market-research
//! GET  /api/parameters/:id/audience-segmentation
//! GET  /api/parameters/:id/brand-positioning
//! POST /api/parameters/:id/content-generation

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use mpd_common::models::{Artifact, ArtifactKind};
use mpd_common::uuid_utils;
use serde::Deserialize;

use crate::{error::ApiResult, AppState};

/// POST /api/parameters/:id/content-generation request body
#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    /// Overrides the configured default brand context
    #[serde(default)]
    pub brand_context: Option<String>,
    /// Accepted for compatibility; not used by generation
    #[serde(default)]
    pub content_type: Option<String>,
}

async fn fetch_artifact(
    state: &AppState,
    id: &str,
    kind: ArtifactKind,
    brand_context: Option<&str>,
) -> ApiResult<Json<Artifact>> {
    let parameter_id = uuid_utils::parse_parameter_id(id)?;
    let artifact = state
        .pipeline
        .fetch_or_generate(parameter_id, kind, brand_context)
        .await?;
    Ok(Json(artifact))
}

pub async fn market_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artifact>> {
    fetch_artifact(&state, &id, ArtifactKind::MarketResearch, None).await
}

pub async fn audience_segmentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artifact>> {
    fetch_artifact(&state, &id, ArtifactKind::AudienceSegmentation, None).await
}

pub async fn brand_positioning(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artifact>> {
    fetch_artifact(&state, &id, ArtifactKind::BrandPositioning, None).await
}

/// POST /api/parameters/:id/content-generation
///
/// The body is optional. Once content exists for the parameter set it is
/// returned unchanged, whatever brand context a later request carries.
pub async fn content_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<ContentRequest>>,
) -> ApiResult<Json<Artifact>> {
    let request = request.map(|Json(body)| body).unwrap_or_default();
    if let Some(content_type) = &request.content_type {
        tracing::debug!(%content_type, "Ignoring requested content type");
    }
    fetch_artifact(
        &state,
        &id,
        ArtifactKind::ContentGeneration,
        request.brand_context.as_deref(),
    )
    .await
}

/// Build artifact routes
pub fn artifact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/parameters/:id/market-research", get(market_research))
        .route(
            "/api/parameters/:id/audience-segmentation",
            get(audience_segmentation),
        )
        .route("/api/parameters/:id/brand-positioning", get(brand_positioning))
        .route("/api/parameters/:id/content-generation", post(content_generation))
}
