//! # Leafscan
//!
//! A Rust library for plant leaf disease classification and severity
//! analysis. Given a leaf photograph it produces a labeled verdict: the
//! predicted disease (or "healthy"), a confidence ranking over the disease
//! catalog, and, for diseased leaves, a 1-5 severity score derived from
//! color and texture statistics.
//!
//! ## Modules
//!
//! - `catalog`: the fixed disease label catalog and label helpers
//! - `preprocess`: image loading and normalization to the model input size
//! - `features`: HSV color summary, diseased-pixel area, GLCM texture
//! - `severity`: the severity heuristic and stage descriptions
//! - `classify`: the class scorer abstraction and confidence ranking
//! - `pipeline`: the end-to-end image-to-verdict orchestrator
//! - `server`: axum HTTP front end (multipart upload → JSON verdict)
//! - `utils`: logging and error handling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use leafscan::classify::PlaceholderScorer;
//! use leafscan::pipeline::{Pipeline, PredictOptions};
//!
//! let scorer = Arc::new(PlaceholderScorer::new(42));
//! let pipeline = Pipeline::new(scorer)?;
//! let result = pipeline.predict_path("leaf.jpg".as_ref(), &PredictOptions::default())?;
//! println!("{}: {:.1}%", result.disease, result.confidence);
//! ```

pub mod catalog;
pub mod classify;
pub mod features;
pub mod pipeline;
pub mod preprocess;
pub mod server;
pub mod severity;
pub mod utils;
pub mod visualize;

// Re-export commonly used items for convenience
pub use catalog::{class_name, display_name, is_healthy_class, CLASS_NAMES, NUM_CLASSES};
pub use classify::{ClassScorer, Classification, Classifier, PlaceholderScorer, ScorerOutput};
pub use features::FeatureSet;
pub use pipeline::{Pipeline, PredictOptions, PredictionResult};
pub use preprocess::{NormalizedImage, IMAGE_SIZE};
pub use severity::{SeverityAnalysis, Stage};
pub use utils::error::{LeafscanError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
