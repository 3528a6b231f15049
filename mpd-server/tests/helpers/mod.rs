//! Shared helpers for mpd-server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mpd_server::config::{Args, ServiceConfig};
use mpd_server::services::{CompletionPrompt, TextGenerationError, TextGenerator};
use mpd_server::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// How the scripted text generator answers
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Return a short strategy text
    Succeed,
    /// Fail as an HTTP error status would
    Fail,
    /// Never answer
    Hang,
}

/// Text generator double that counts its calls
pub struct ScriptedGenerator {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Arc<Self> {
        Self::with_delay(script, Duration::ZERO)
    }

    pub fn with_delay(script: Script, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String, TextGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.script {
            Script::Succeed => {
                Ok("1. Lead with festival heritage\n2. Post reels at 7 PM".to_string())
            }
            Script::Fail => Err(TextGenerationError::Api(500, "upstream failure".to_string())),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Test app over an in-memory database
pub async fn create_test_app(text_generator: Arc<dyn TextGenerator>) -> (Router, sqlx::SqlitePool) {
    create_test_app_with_timeout(text_generator, 5).await
}

pub async fn create_test_app_with_timeout(
    text_generator: Arc<dyn TextGenerator>,
    timeout_secs: u64,
) -> (Router, sqlx::SqlitePool) {
    let pool = mpd_common::db::init_memory_pool()
        .await
        .expect("Failed to create in-memory database");

    build_app(pool, text_generator, timeout_secs)
}

/// Test app over a database file, so concurrent requests use separate connections
pub async fn create_file_test_app(
    text_generator: Arc<dyn TextGenerator>,
    db_path: &Path,
) -> (Router, sqlx::SqlitePool) {
    let pool = mpd_common::db::init_database_pool(db_path)
        .await
        .expect("Failed to create database file");

    build_app(pool, text_generator, 5)
}

fn build_app(
    pool: sqlx::SqlitePool,
    text_generator: Arc<dyn TextGenerator>,
    timeout_secs: u64,
) -> (Router, sqlx::SqlitePool) {
    let mut config = ServiceConfig::resolve(Args::default(), Default::default());
    config.ai.timeout_secs = timeout_secs;

    let state = AppState::from_config(pool.clone(), &config, text_generator);
    let app = mpd_server::build_router(state, &config.cors_origins);

    (app, pool)
}

/// Valid parameter submission
pub fn parameter_body() -> Value {
    json!({
        "emerging_trends": ["Lab-grown Diamonds", "Cultural Fusion"],
        "timeframe": "3 months",
        "personas": ["Gen-Z Shopper", "Bridal Market"],
        "num_competitors": 3
    })
}

/// Send a request and decode the JSON response body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Create a parameter set and return its id
pub async fn create_parameter_set(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/parameters", Some(parameter_body())).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}
