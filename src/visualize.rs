//! Severity overlay rendering
//!
//! Produces the optional visualization artifact: the normalized image with
//! diseased-mask pixels highlighted in red, alpha-blended over the
//! original. Gated by the caller's display flag; never produced for
//! healthy verdicts.

use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::features::hsv;
use crate::preprocess::{NormalizedImage, IMAGE_SIZE};
use crate::utils::error::{LeafscanError, Result};

/// Blend weight of the highlight color over the original pixel
const HIGHLIGHT_ALPHA: f32 = 0.6;

/// Highlight color for diseased pixels
const HIGHLIGHT: [f32; 3] = [255.0, 0.0, 0.0];

/// Render the diseased-mask overlay for a normalized image and save it to
/// `path` (format chosen by extension, PNG recommended).
pub fn render_overlay(image: &NormalizedImage, path: &Path) -> Result<()> {
    let rgb = image.to_rgb8();
    let mask = hsv::diseased_mask(&rgb);

    let size = IMAGE_SIZE as u32;
    let mut canvas = ImageBuffer::new(size, size);

    for (i, (&px, &diseased)) in rgb.iter().zip(mask.iter()).enumerate() {
        let x = (i % IMAGE_SIZE) as u32;
        let y = (i / IMAGE_SIZE) as u32;

        let out = if diseased {
            [
                blend(px[0], HIGHLIGHT[0]),
                blend(px[1], HIGHLIGHT[1]),
                blend(px[2], HIGHLIGHT[2]),
            ]
        } else {
            px
        };
        canvas.put_pixel(x, y, Rgb(out));
    }

    canvas.save(path).map_err(|e| match e {
        image::ImageError::IoError(io) => LeafscanError::Io(io),
        other => {
            LeafscanError::InvalidInput(format!("Failed to encode overlay to {:?}: {}", path, other))
        }
    })
}

fn blend(original: u8, highlight: f32) -> u8 {
    ((1.0 - HIGHLIGHT_ALPHA) * original as f32 + HIGHLIGHT_ALPHA * highlight)
        .round()
        .clamp(0.0, 255.0) as u8
}
