//! Integration tests for fdrk-fe API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Submission success, rename propagation and rank reporting
//! - Error mapping for validation, missing images and storage failures
//! - Image browsing

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fdrk_common::config::DataPaths;
use fdrk_common::FoodRanking;
use fdrk_fe::{build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: app rooted in a fresh temp directory
fn setup_app() -> (TempDir, axum::Router, FoodRanking) {
    let dir = TempDir::new().expect("Should create temp dir");
    let root = dir.path().join("root");
    let service = FoodRanking::new(&DataPaths::under(&root));
    let app = build_router(AppState::new(service.clone(), root));
    (dir, app, service)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app, _service) = setup_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fdrk-fe");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_index_serves_form() {
    let (_dir, app, _service) = setup_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/submissions"));
}

#[tokio::test]
async fn test_submission_archives_and_ranks() {
    let (dir, app, service) = setup_app();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();

    let request = post_json(
        "/api/submissions",
        &json!({
            "image": photo.to_string_lossy(),
            "taste": 8,
            "price": "6",
            "speed": 7,
            "remark": "spicy_noodles"
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["image"], "spicy_noodles.jpg");
    assert_eq!(body["rank"], 1);
    assert_eq!(body["total_entries"], 1);
    assert!((body["composite_score"].as_f64().unwrap() - 7.1).abs() < 1e-9);

    let ranked = service.rankings().read_all().unwrap();
    assert_eq!(ranked[0].image, "spicy_noodles.jpg");
    assert!(service.archiver().dir().join("spicy_noodles.jpg").exists());
}

#[tokio::test]
async fn test_second_submission_reports_its_rank() {
    let (dir, app, _service) = setup_app();
    let a = dir.path().join("a.jpg");
    let b = dir.path().join("b.jpg");
    std::fs::write(&a, b"a").unwrap();
    std::fs::write(&b, b"b").unwrap();

    let first = json!({"image": a.to_string_lossy(), "taste": 9, "price": 9, "speed": 9});
    let response = app.clone().oneshot(post_json("/api/submissions", &first)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second = json!({"image": b.to_string_lossy(), "taste": 8, "price": 6, "speed": 7});
    let response = app.oneshot(post_json("/api/submissions", &second)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["rank"], 2);
    assert_eq!(body["total_entries"], 2);
}

#[tokio::test]
async fn test_out_of_range_score_is_bad_request() {
    let (dir, app, service) = setup_app();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();

    let request = post_json(
        "/api/submissions",
        &json!({"image": photo.to_string_lossy(), "taste": 11, "price": 5, "speed": 5}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(!service.store().path().exists());
}

#[tokio::test]
async fn test_non_numeric_score_is_bad_request() {
    let (dir, app, _service) = setup_app();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();

    let request = post_json(
        "/api/submissions",
        &json!({"image": photo.to_string_lossy(), "taste": "delicious", "price": 5, "speed": 5}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_image_is_not_found() {
    let (dir, app, service) = setup_app();

    let request = post_json(
        "/api/submissions",
        &json!({"image": dir.path().join("gone.jpg").to_string_lossy(), "taste": 5, "price": 5, "speed": 5}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "IMAGE_NOT_FOUND");
    assert!(!service.store().path().exists());
}

#[tokio::test]
async fn test_browse_lists_images() {
    let (dir, app, _service) = setup_app();
    let pictures = dir.path().join("pictures");
    std::fs::create_dir_all(&pictures).unwrap();
    std::fs::write(pictures.join("pho.jpeg"), b"").unwrap();
    std::fs::write(pictures.join("menu.txt"), b"").unwrap();

    let uri = format!("/api/browse?dir={}", pictures.to_string_lossy());
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert!(images[0].as_str().unwrap().ends_with("pho.jpeg"));
}

#[tokio::test]
async fn test_browse_missing_directory() {
    let (dir, app, _service) = setup_app();

    let uri = format!("/api/browse?dir={}", dir.path().join("nowhere").to_string_lossy());
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_browse_empty_dir_lists_root_folder() {
    let (dir, app, _service) = setup_app();
    let root = dir.path().join("root");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("bun.png"), b"").unwrap();

    let response = app.oneshot(get("/api/browse?dir=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["dir"], root.to_string_lossy().into_owned());
    assert_eq!(body["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreadable_store_is_service_unavailable() {
    let (dir, app, service) = setup_app();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();
    // A directory where data.csv is expected
    std::fs::create_dir_all(service.store().path()).unwrap();

    let request = post_json(
        "/api/submissions",
        &json!({"image": photo.to_string_lossy(), "taste": 5, "price": 5, "speed": 5}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");
    assert!(!service.rankings().path().exists());
}

#[tokio::test]
async fn test_archive_failure_leaves_tables_unchanged() {
    let (dir, app, service) = setup_app();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();
    // Managed image directory is a regular file
    std::fs::create_dir_all(dir.path().join("root")).unwrap();
    std::fs::write(service.archiver().dir(), b"").unwrap();

    let request = post_json(
        "/api/submissions",
        &json!({"image": photo.to_string_lossy(), "taste": 8, "price": 6, "speed": 7}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "ARCHIVE_WRITE_ERROR");
    assert!(service.store().read_all().unwrap().is_empty());
    assert!(service.rankings().read_all().unwrap().is_empty());
}
