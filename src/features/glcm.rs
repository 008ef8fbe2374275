//! Gray-level co-occurrence texture statistics
//!
//! Builds a symmetric, normalized co-occurrence matrix over 256 gray levels
//! at a single horizontal offset (angle 0) and derives the contrast and
//! dissimilarity statistics from it. Contrast grows with strong local
//! intensity variation, a proxy for lesion texture on a leaf surface.

/// Number of gray levels in the co-occurrence matrix
pub const GRAY_LEVELS: usize = 256;

/// Convert 8-bit RGB pixels to 8-bit grayscale (Rec.601 luma weights)
pub fn to_grayscale(rgb: &[[u8; 3]]) -> Vec<u8> {
    rgb.iter()
        .map(|&[r, g, b]| {
            (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64)
                .round()
                .clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// A normalized, symmetric gray-level co-occurrence matrix
#[derive(Debug, Clone)]
pub struct CooccurrenceMatrix {
    /// Row-major 256x256 joint probabilities, summing to 1 (or all zero for
    /// degenerate inputs with no pixel pairs)
    probs: Vec<f64>,
}

impl CooccurrenceMatrix {
    /// Build the matrix from a row-major grayscale image at the given
    /// horizontal pixel offset (angle 0). Each (left, right) pair is counted
    /// in both directions, making the matrix symmetric, then normalized.
    pub fn horizontal(gray: &[u8], width: usize, height: usize, distance: usize) -> Self {
        debug_assert_eq!(gray.len(), width * height);

        let mut counts = vec![0.0f64; GRAY_LEVELS * GRAY_LEVELS];
        let mut total = 0.0f64;

        if distance > 0 && width > distance {
            for row in 0..height {
                let base = row * width;
                for col in 0..width - distance {
                    let i = gray[base + col] as usize;
                    let j = gray[base + col + distance] as usize;
                    counts[i * GRAY_LEVELS + j] += 1.0;
                    counts[j * GRAY_LEVELS + i] += 1.0;
                    total += 2.0;
                }
            }
        }

        if total > 0.0 {
            for c in counts.iter_mut() {
                *c /= total;
            }
        }

        Self { probs: counts }
    }

    /// Contrast: sum over P(i,j) * (i - j)^2
    pub fn contrast(&self) -> f64 {
        self.weighted_sum(|d| d * d)
    }

    /// Dissimilarity: sum over P(i,j) * |i - j|
    pub fn dissimilarity(&self) -> f64 {
        self.weighted_sum(|d| d)
    }

    fn weighted_sum(&self, weight: impl Fn(f64) -> f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..GRAY_LEVELS {
            let row = &self.probs[i * GRAY_LEVELS..(i + 1) * GRAY_LEVELS];
            for (j, &p) in row.iter().enumerate() {
                if p > 0.0 {
                    sum += p * weight((i as f64 - j as f64).abs());
                }
            }
        }
        sum
    }
}

/// Texture summary derived from the co-occurrence matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSummary {
    /// GLCM contrast (non-negative)
    pub contrast: f64,
    /// GLCM dissimilarity (non-negative)
    pub dissimilarity: f64,
}

/// Compute texture statistics for an 8-bit RGB image
pub fn summarize(rgb: &[[u8; 3]], width: usize, height: usize, distance: usize) -> TextureSummary {
    let gray = to_grayscale(rgb);
    let glcm = CooccurrenceMatrix::horizontal(&gray, width, height, distance);
    TextureSummary {
        contrast: glcm.contrast(),
        dissimilarity: glcm.dissimilarity(),
    }
}
