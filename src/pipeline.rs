//! Image-to-verdict pipeline orchestration
//!
//! The [`Pipeline`] wires the stages together: load and normalize the
//! image, classify it over the disease catalog, and, unless the predicted
//! label is healthy, extract features and score severity. Each prediction
//! is independent and touches no shared mutable state; the scorer handle is
//! built once and shared read-only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{self, CLASS_NAMES};
use crate::classify::{ClassScorer, Classifier, RankedClass};
use crate::features::FeatureSet;
use crate::preprocess::NormalizedImage;
use crate::severity::SeverityAnalysis;
use crate::utils::error::{LeafscanError, Result};
use crate::visualize;

/// Per-call options for a prediction
#[derive(Debug, Clone, Default)]
pub struct PredictOptions {
    /// When set, render the diseased-mask overlay artifact to this path.
    /// Skipped for healthy verdicts.
    pub overlay_path: Option<PathBuf>,
}

/// One ranked entry of the reported top-k list, with a display-formatted label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPrediction {
    pub disease: String,
    pub confidence: f32,
}

/// The final verdict for one image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Display-formatted disease label, e.g. "Apple: Apple scab"
    pub disease: String,
    /// Confidence percentage of the predicted class
    pub confidence: f32,
    /// Severity verdict (the fixed healthy record for healthy labels)
    pub severity: SeverityAnalysis,
    /// Ranked top predictions, predicted class first
    pub top_predictions: Vec<TopPrediction>,
    /// True when the scorer produced an out-of-range class index that was
    /// redirected to class 0. Also surfaced as a logged warning.
    #[serde(skip)]
    pub out_of_range_clamped: bool,
}

/// End-to-end image-to-verdict pipeline
#[derive(Clone)]
pub struct Pipeline {
    classifier: Classifier,
}

impl Pipeline {
    /// Build a pipeline around a scoring strategy. Fails with
    /// [`LeafscanError::ModelUnavailable`] when the scorer does not cover
    /// the disease catalog.
    pub fn new(scorer: Arc<dyn ClassScorer>) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(scorer)?,
        })
    }

    /// Predict from an image file. Decoding failures surface as
    /// [`LeafscanError::ImageLoad`]; no partial result is produced.
    pub fn predict_path(&self, path: &Path, options: &PredictOptions) -> Result<PredictionResult> {
        let image = image::open(path)
            .map_err(|e| LeafscanError::ImageLoad(path.to_path_buf(), e.to_string()))?;
        self.predict_image(&image, options)
    }

    /// Predict from an already-decoded image
    pub fn predict_image(
        &self,
        image: &image::DynamicImage,
        options: &PredictOptions,
    ) -> Result<PredictionResult> {
        let normalized = NormalizedImage::from_dynamic(image);

        let classification = self.classifier.classify(normalized.as_slice());
        let label = CLASS_NAMES[classification.class_index];
        debug!(label, confidence = classification.confidence, "classified image");

        let healthy = catalog::is_healthy_class(classification.class_index);
        let severity = if healthy {
            SeverityAnalysis::healthy()
        } else {
            let features = FeatureSet::extract(&normalized);
            SeverityAnalysis::from_features(&features)
        };

        if let Some(overlay_path) = &options.overlay_path {
            if healthy {
                debug!("healthy verdict, skipping overlay rendering");
            } else {
                visualize::render_overlay(&normalized, overlay_path)?;
                info!(path = ?overlay_path, "wrote severity overlay");
            }
        }

        Ok(PredictionResult {
            disease: catalog::display_name(label),
            confidence: classification.confidence,
            severity,
            top_predictions: classification.top.iter().map(Self::format_ranked).collect(),
            out_of_range_clamped: classification.clamped,
        })
    }

    fn format_ranked(ranked: &RankedClass) -> TopPrediction {
        TopPrediction {
            disease: catalog::display_name(CLASS_NAMES[ranked.class_index]),
            confidence: ranked.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ScorerOutput;
    use image::{DynamicImage, Rgb, RgbImage};

    struct FixedIndex(usize);

    impl ClassScorer for FixedIndex {
        fn score(&self, _pixels: &[f32]) -> ScorerOutput {
            ScorerOutput::Index(self.0)
        }
        fn num_classes(&self) -> usize {
            crate::catalog::NUM_CLASSES
        }
    }

    fn gray_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([128, 128, 128])))
    }

    #[test]
    fn test_healthy_label_skips_feature_scoring() {
        let healthy_idx = catalog::class_index("Apple___healthy").unwrap();
        let pipeline = Pipeline::new(Arc::new(FixedIndex(healthy_idx))).unwrap();
        let result = pipeline
            .predict_image(&gray_image(), &PredictOptions::default())
            .unwrap();

        assert_eq!(result.disease, "Apple: healthy");
        assert_eq!(result.severity.severity_score, 0);
        assert!(result.severity.color_metrics.is_none());
    }

    #[test]
    fn test_diseased_label_includes_color_metrics() {
        let pipeline = Pipeline::new(Arc::new(FixedIndex(0))).unwrap();
        let result = pipeline
            .predict_image(&gray_image(), &PredictOptions::default())
            .unwrap();

        assert_eq!(result.disease, "Apple: Apple scab");
        assert!(result.severity.color_metrics.is_some());
        assert_eq!(result.top_predictions.len(), 3);
    }

    #[test]
    fn test_missing_file_is_image_load_error() {
        let pipeline = Pipeline::new(Arc::new(FixedIndex(0))).unwrap();
        let err = pipeline
            .predict_path(Path::new("/no/such/leaf.png"), &PredictOptions::default())
            .unwrap_err();
        assert!(matches!(err, LeafscanError::ImageLoad(_, _)));
    }

    #[test]
    fn test_result_json_shape() {
        let pipeline = Pipeline::new(Arc::new(FixedIndex(0))).unwrap();
        let result = pipeline
            .predict_image(&gray_image(), &PredictOptions::default())
            .unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("disease").is_some());
        assert!(value.get("confidence").is_some());
        assert!(value.get("severity").is_some());
        // The clamp flag is internal, not part of the wire record
        assert!(value.get("out_of_range_clamped").is_none());
    }
}
