//! Liveness and service-info endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::server::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: crate::VERSION.to_string(),
    })
}

/// GET / - Service description and usage
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Leafscan Plant Disease Prediction API",
        "usage": {
            "endpoint": "/predict",
            "method": "POST",
            "body": "multipart form-data with 'image' file"
        }
    }))
}
