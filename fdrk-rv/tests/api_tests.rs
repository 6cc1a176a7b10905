//! Integration tests for fdrk-rv endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - HTML ranking table and its empty state
//! - JSON ranking listing and RANKING_UNAVAILABLE

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fdrk_common::{RankTable, RankedRecord, RankingReader};
use fdrk_rv::{build_router, AppState};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: app reading `rank.csv` inside a fresh temp directory
fn setup_app() -> (TempDir, PathBuf, axum::Router) {
    let dir = TempDir::new().expect("Should create temp dir");
    let rank_table = dir.path().join("rank.csv");
    let app = build_router(AppState::new(RankingReader::new(&rank_table)));
    (dir, rank_table, app)
}

fn write_ranking(path: &PathBuf) {
    RankTable::new(path)
        .write_all(&[
            RankedRecord {
                image: "hotpot.jpg".into(),
                composite_score: 9.0,
                rank: 1,
            },
            RankedRecord {
                image: "spicy_noodles.jpg".into(),
                composite_score: 7.1,
                rank: 2,
            },
        ])
        .unwrap();
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _path, app) = setup_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fdrk-rv");
}

#[tokio::test]
async fn test_index_renders_table() {
    let (_dir, path, app) = setup_app();
    write_ranking(&path);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("<td>hotpot</td>"));
    assert!(html.contains("<td>spicy_noodles</td>"));
    assert!(!html.contains("spicy_noodles.jpg"), "extension should be stripped");
    assert!(html.find("hotpot").unwrap() < html.find("spicy_noodles").unwrap());
}

#[tokio::test]
async fn test_index_empty_state_without_table() {
    let (_dir, _path, app) = setup_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("No rankings yet."));
}

#[tokio::test]
async fn test_rankings_json() {
    let (_dir, path, app) = setup_app();
    write_ranking(&path);

    let response = app.clone().oneshot(get("/api/rankings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_bytes(response.into_body()).await;

    let body: Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(body[0]["rank"], 1);
    assert_eq!(body[0]["food_name"], "hotpot");
    assert_eq!(body[1]["food_name"], "spicy_noodles");
    assert!((body[1]["composite_score"].as_f64().unwrap() - 7.1).abs() < 1e-9);

    // Idempotent without new submissions
    let response = app.oneshot(get("/api/rankings")).await.unwrap();
    assert_eq!(body_bytes(response.into_body()).await, first);
}

#[tokio::test]
async fn test_rankings_json_unavailable() {
    let (_dir, _path, app) = setup_app();

    let response = app.oneshot(get("/api/rankings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body["error"]["code"], "RANKING_UNAVAILABLE");
}
