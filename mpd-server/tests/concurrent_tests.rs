//! Concurrent first requests for the same artifact store exactly one copy

mod helpers;

use axum::http::StatusCode;
use helpers::{
    create_file_test_app, create_parameter_set, create_test_app, send, Script, ScriptedGenerator,
};
use std::time::Duration;
use tokio::task::JoinSet;
use uuid::Uuid;

const PARALLEL_REQUESTS: usize = 8;

#[tokio::test]
async fn test_parallel_first_fetch_stores_one_artifact() {
    let (app, pool) = create_test_app(ScriptedGenerator::new(Script::Succeed)).await;
    let id = create_parameter_set(&app).await;

    let mut tasks = JoinSet::new();
    for _ in 0..PARALLEL_REQUESTS {
        let app = app.clone();
        let uri = format!("/api/parameters/{}/market-research", id);
        tasks.spawn(async move { send(&app, "GET", &uri, None).await });
    }

    let mut bodies = Vec::new();
    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert!(bodies.iter().all(|body| body == &bodies[0]));
    let parameter_id = Uuid::parse_str(&id).unwrap();
    assert_eq!(mpd_common::db::count_artifacts(&pool, parameter_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_parallel_content_generation_returns_winner() {
    // The delay keeps every request in flight past the cache check
    let generator = ScriptedGenerator::with_delay(Script::Succeed, Duration::from_millis(100));
    let (app, pool) = create_test_app(generator.clone()).await;
    let id = create_parameter_set(&app).await;

    let mut tasks = JoinSet::new();
    for _ in 0..PARALLEL_REQUESTS {
        let app = app.clone();
        let uri = format!("/api/parameters/{}/content-generation", id);
        tasks.spawn(async move { send(&app, "POST", &uri, None).await });
    }

    let mut bodies = Vec::new();
    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    let first_id = bodies[0]["id"].clone();
    assert!(bodies.iter().all(|body| body["id"] == first_id));
    assert!(generator.calls() >= 1);

    let parameter_id = Uuid::parse_str(&id).unwrap();
    assert_eq!(mpd_common::db::count_artifacts(&pool, parameter_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_different_parameter_sets_do_not_interfere() {
    let (app, pool) = create_test_app(ScriptedGenerator::new(Script::Succeed)).await;
    let first = create_parameter_set(&app).await;
    let second = create_parameter_set(&app).await;

    let mut tasks = JoinSet::new();
    for id in [first.clone(), second.clone()] {
        for path in ["market-research", "audience-segmentation", "brand-positioning"] {
            let app = app.clone();
            let uri = format!("/api/parameters/{}/{}", id, path);
            tasks.spawn(async move { send(&app, "GET", &uri, None).await.0 });
        }
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    for id in [first, second] {
        let parameter_id = Uuid::parse_str(&id).unwrap();
        assert_eq!(mpd_common::db::count_artifacts(&pool, parameter_id).await.unwrap(), 3);
    }
}

#[tokio::test]
async fn test_parallel_first_fetch_on_database_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("market_pulse.db");
    let generator = ScriptedGenerator::with_delay(Script::Succeed, Duration::from_millis(50));
    let (app, pool) = create_file_test_app(generator, &db_path).await;
    let id = create_parameter_set(&app).await;

    let mut tasks = JoinSet::new();
    for i in 0..32 {
        let app = app.clone();
        let (method, path) = if i % 2 == 0 {
            ("GET", "market-research")
        } else {
            ("POST", "content-generation")
        };
        let uri = format!("/api/parameters/{}/{}", id, path);
        tasks.spawn(async move { (path, send(&app, method, &uri, None).await) });
    }

    let mut research_ids = Vec::new();
    let mut content_ids = Vec::new();
    while let Some(result) = tasks.join_next().await {
        let (path, (status, body)) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        if path == "market-research" {
            research_ids.push(body["id"].clone());
        } else {
            content_ids.push(body["id"].clone());
        }
    }

    assert_eq!(research_ids.len(), 16);
    assert!(research_ids.iter().all(|id| id == &research_ids[0]));
    assert!(content_ids.iter().all(|id| id == &content_ids[0]));

    let parameter_id = Uuid::parse_str(&id).unwrap();
    assert_eq!(mpd_common::db::count_artifacts(&pool, parameter_id).await.unwrap(), 2);
    pool.close().await;
}
