//! Feature extraction from normalized leaf images
//!
//! This module turns a [`NormalizedImage`](crate::preprocess::NormalizedImage)
//! into the statistics the severity heuristic consumes:
//! - an HSV color-space summary (mean hue, saturation, value)
//! - the yellow/brown diseased-pixel area percentage
//! - gray-level co-occurrence texture statistics (contrast, dissimilarity)
//!
//! Extraction is deterministic and side-effect free; a [`FeatureSet`] is
//! computed once per prediction and never cached or mutated.

pub mod glcm;
pub mod hsv;

use serde::{Deserialize, Serialize};

use crate::preprocess::{NormalizedImage, IMAGE_SIZE};

// Re-export main types for convenience
pub use glcm::{CooccurrenceMatrix, TextureSummary};
pub use hsv::{ColorSummary, HsvPixel};

/// Default co-occurrence offset: the adjacent horizontal neighbor
pub const DEFAULT_GLCM_DISTANCE: usize = 1;

/// Derived, read-only statistics of a single normalized image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Mean hue over all pixels (8-bit HSV domain, 0-179)
    pub mean_hue: f64,
    /// Mean saturation over all pixels (0-255)
    pub mean_saturation: f64,
    /// Mean value over all pixels (0-255)
    pub mean_value: f64,
    /// Percentage of pixels matching the diseased mask (0-100)
    pub affected_area_percent: f64,
    /// GLCM contrast (non-negative)
    pub contrast: f64,
    /// GLCM dissimilarity (non-negative)
    pub dissimilarity: f64,
}

impl FeatureSet {
    /// Extract the full feature set from a normalized image using the
    /// default co-occurrence offset.
    pub fn extract(image: &NormalizedImage) -> Self {
        Self::extract_with_distance(image, DEFAULT_GLCM_DISTANCE)
    }

    /// Extract with an explicit co-occurrence offset distance
    pub fn extract_with_distance(image: &NormalizedImage, distance: usize) -> Self {
        let rgb = image.to_rgb8();
        let color = hsv::summarize(&rgb);
        let texture = glcm::summarize(&rgb, IMAGE_SIZE, IMAGE_SIZE, distance);

        Self {
            mean_hue: color.mean_hue,
            mean_saturation: color.mean_saturation,
            mean_value: color.mean_value,
            affected_area_percent: color.affected_area_percent,
            contrast: texture.contrast,
            dissimilarity: texture.dissimilarity,
        }
    }
}
