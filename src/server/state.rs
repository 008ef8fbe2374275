//! Application state for the leafscan server
//!
//! Holds the shared pipeline handle (built once at startup, read-only
//! thereafter) and the server configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::Pipeline;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory where uploaded images are staged before prediction
    pub upload_dir: PathBuf,
    /// Single allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<String>,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            upload_dir: PathBuf::from("uploads"),
            cors_origin: None,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// The prediction pipeline, shared read-only across requests
    pub pipeline: Pipeline,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            pipeline,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
