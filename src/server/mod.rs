//! HTTP front end
//!
//! A thin axum service over the prediction pipeline:
//! - `POST /predict` accepts a multipart image upload and returns the JSON
//!   verdict
//! - `GET /health` is the liveness endpoint
//! - `GET /` describes usage
//!
//! The pipeline handle is built once at startup and shared read-only; each
//! request stages its upload independently and runs on a blocking worker.

pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::Pipeline;
use crate::utils::error::{Result, ResultExt};

pub use state::{AppState, ServerConfig, SharedState};

/// Build the application router for the given shared state.
/// Fails when the configured CORS origin is not a valid header value: a
/// restrictive origin must never silently degrade to allow-all.
pub fn router(state: SharedState) -> Result<Router> {
    let cors = match &state.config.cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let body_limit = state.config.max_upload_bytes;

    Ok(Router::new()
        .route("/", get(routes::health::service_info))
        .route("/predict", post(routes::predict::predict))
        .route("/health", get(routes::health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit)))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig, pipeline: Pipeline) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = Arc::new(AppState::new(config, pipeline));
    let app = router(state)?;

    info!("Starting leafscan server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
