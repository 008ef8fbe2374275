//! Prediction endpoint: multipart image upload to JSON verdict

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::pipeline::{PredictOptions, PredictionResult};
use crate::server::state::SharedState;

/// Error response carrying an HTTP status and a JSON `{"error": ...}` body
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// POST /predict - classify an uploaded leaf image
///
/// Expects a multipart form with an `image` file field. The upload is
/// staged to the configured upload directory under a unique name, then fed
/// through the pipeline on a blocking worker.
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<PredictionResult>, ApiError> {
    let mut staged: Option<std::path::PathBuf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        if file_name.is_empty() {
            warn!("empty filename provided");
            return Err(ApiError::bad_request("No selected file"));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        let staged_path = state
            .config
            .upload_dir
            .join(format!("{}_{}", Uuid::new_v4(), sanitize(&file_name)));
        tokio::fs::write(&staged_path, &bytes)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to stage upload: {}", e)))?;
        info!(path = ?staged_path, bytes = bytes.len(), "staged uploaded image");

        staged = Some(staged_path);
        break;
    }

    let Some(path) = staged else {
        warn!("no image file provided");
        return Err(ApiError::bad_request("No image file provided"));
    };

    // The pipeline is CPU-bound; keep it off the async workers.
    let shared = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        shared
            .pipeline
            .predict_path(&path, &PredictOptions::default())
    })
    .await
    .map_err(|e| ApiError::internal(format!("Prediction task failed: {}", e)))?;

    match result {
        Ok(prediction) => {
            info!(
                disease = %prediction.disease,
                confidence = prediction.confidence,
                "prediction successful"
            );
            Ok(Json(prediction))
        }
        Err(e) => {
            error!("prediction failed: {}", e);
            Err(ApiError::internal(e.to_string()))
        }
    }
}

/// Strip any path components from a client-supplied filename
fn sanitize(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}
