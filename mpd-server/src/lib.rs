//! mpd-server library interface
//!
//! Exposes the application state and router for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod generators;
pub mod pipeline;
pub mod services;
pub mod summary;

pub use crate::error::{ApiError, ApiResult};

use axum::http::HeaderValue;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::generators::{ContentGenerator, Generators};
use crate::pipeline::Pipeline;
use crate::services::TextGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        let db = pipeline.db().clone();
        Self {
            pipeline: Arc::new(pipeline),
            db,
            startup_time: Utc::now(),
        }
    }

    /// Wire the pipeline from a resolved configuration and a text generator
    pub fn from_config(
        db: SqlitePool,
        config: &ServiceConfig,
        text_generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let content =
            ContentGenerator::new(text_generator, config.ai_timeout(), config.ai.max_tokens);
        Self::new(Pipeline::new(
            db,
            Generators::new(content),
            config.default_brand_context.clone(),
            config.max_lock_wait_ms,
        ))
    }
}

/// Build application router
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::root_routes())
        .merge(api::parameter_routes())
        .merge(api::artifact_routes())
        .merge(api::dashboard_routes())
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origins; `*` allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
