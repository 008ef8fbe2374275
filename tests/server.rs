//! Router-level tests for the HTTP front end

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use image::{DynamicImage, Rgb, RgbImage};
use serde_json::Value;
use tower::ServiceExt;

use leafscan::classify::PlaceholderScorer;
use leafscan::pipeline::Pipeline;
use leafscan::server::{self, AppState, ServerConfig};

const BOUNDARY: &str = "leafscan-test-boundary";

fn test_router(
    upload_dir: &Path,
    cors_origin: Option<String>,
) -> leafscan::Result<axum::Router> {
    let pipeline = Pipeline::new(Arc::new(PlaceholderScorer::new(42)))?;
    let config = ServerConfig {
        upload_dir: upload_dir.to_path_buf(),
        cors_origin,
        ..ServerConfig::default()
    };
    server::router(Arc::new(AppState::new(config, pipeline)))
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([128, 128, 128])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn health_endpoint_reports_liveness() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].is_number());
    assert_eq!(body["version"], leafscan::VERSION);
}

#[tokio::test]
async fn service_info_describes_predict_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["usage"]["endpoint"], "/predict");
}

#[tokio::test]
async fn predict_without_image_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let body = multipart_body("other", "leaf.png", b"not the right field");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No image file provided");
}

#[tokio::test]
async fn predict_with_empty_filename_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let body = multipart_body("image", "", b"some bytes");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No selected file");
}

#[tokio::test]
async fn predict_with_undecodable_upload_fails_without_partial_result() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let body = multipart_body("image", "leaf.png", b"definitely not an image");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Failed to load image"));
}

#[tokio::test]
async fn predict_returns_full_verdict_for_valid_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), None).unwrap();

    let body = multipart_body("image", "leaf.png", &png_bytes());
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["disease"].is_string());
    assert!(body["confidence"].is_number());
    assert!(body["severity"]["severity_score"].is_number());
    assert_eq!(body["top_predictions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_cors_origin_fails_router_construction() {
    // A restrictive origin that cannot be parsed must not degrade to
    // allow-all; building the router has to fail instead.
    let dir = tempfile::tempdir().unwrap();
    let err = test_router(dir.path(), Some("http://foo bar".to_string())).unwrap_err();
    assert!(matches!(err, leafscan::LeafscanError::InvalidInput(_)));
    assert!(err.to_string().contains("Invalid CORS origin"));
}

#[tokio::test]
async fn valid_cors_origin_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path(), Some("https://example.com".to_string())).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
