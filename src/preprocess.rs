//! Image normalization for the classification pipeline
//!
//! Every input image, whatever its original size or format, is resized to a
//! fixed 224x224 RGB frame and rescaled to [0,1] channel values. The
//! normalized frame is the single representation both the classifier and the
//! feature extractor consume.

use image::{imageops::FilterType, DynamicImage};

/// Target edge length for normalized images (square)
pub const IMAGE_SIZE: usize = 224;

/// Number of color channels (RGB)
pub const CHANNELS: usize = 3;

/// A fixed-size normalized image: 224x224x3, row-major HWC layout,
/// channel order R,G,B, every value in [0,1].
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pixels: Vec<f32>,
}

impl NormalizedImage {
    /// Normalize an arbitrary-size decoded image: resize to 224x224 and
    /// rescale 8-bit intensities to [0,1].
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let resized = image.resize_exact(
            IMAGE_SIZE as u32,
            IMAGE_SIZE as u32,
            FilterType::Lanczos3,
        );
        let rgb = resized.to_rgb8();

        let mut pixels = Vec::with_capacity(IMAGE_SIZE * IMAGE_SIZE * CHANNELS);
        for pixel in rgb.pixels() {
            pixels.push(pixel[0] as f32 / 255.0);
            pixels.push(pixel[1] as f32 / 255.0);
            pixels.push(pixel[2] as f32 / 255.0);
        }

        Self { pixels }
    }

    /// Flattened pixel values in HWC order, the classifier's input layout
    pub fn as_slice(&self) -> &[f32] {
        &self.pixels
    }

    /// Number of pixels (height * width)
    pub fn pixel_count(&self) -> usize {
        IMAGE_SIZE * IMAGE_SIZE
    }

    /// Rescale back to the 8-bit domain as (r, g, b) triples.
    ///
    /// The feature extractor thresholds are calibrated against 8-bit HSV
    /// values, so feature extraction always starts from this view rather
    /// than the [0,1] floats.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| {
                [
                    (px[0] * 255.0).round().clamp(0.0, 255.0) as u8,
                    (px[1] * 255.0).round().clamp(0.0, 255.0) as u8,
                    (px[2] * 255.0).round().clamp(0.0, 255.0) as u8,
                ]
            })
            .collect()
    }
}
