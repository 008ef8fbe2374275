//! Placeholder scoring model
//!
//! Stands in for a trained classifier: it produces a deterministic
//! pseudo-random probability distribution keyed on the input pixels and a
//! seed. Its predictions carry no statistical meaning; any real deployment
//! replaces this with a trained [`ClassScorer`](super::ClassScorer)
//! implementation while keeping the same contract.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ClassScorer, ScorerOutput};
use crate::catalog::NUM_CLASSES;

/// Deterministic pseudo-random scorer over the full disease catalog
#[derive(Debug, Clone)]
pub struct PlaceholderScorer {
    seed: u64,
    num_classes: usize,
}

impl PlaceholderScorer {
    /// Create a placeholder scorer. The seed fixes the mapping from images
    /// to scores; identical (seed, image) pairs always score identically.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            num_classes: NUM_CLASSES,
        }
    }

    /// FNV-1a over the quantized pixels, folded with the seed. Quantizing
    /// to 8 bits keeps the hash stable across float round trips.
    fn pixel_hash(&self, pixels: &[f32]) -> u64 {
        let mut hash = 0xcbf2_9ce4_8422_2325u64 ^ self.seed;
        for &p in pixels {
            let q = (p.clamp(0.0, 1.0) * 255.0).round() as u8;
            hash ^= q as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }
}

impl Default for PlaceholderScorer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ClassScorer for PlaceholderScorer {
    fn score(&self, pixels: &[f32]) -> ScorerOutput {
        let mut rng = StdRng::seed_from_u64(self.pixel_hash(pixels));

        let weights: Vec<f32> = (0..self.num_classes).map(|_| rng.gen::<f32>()).collect();
        let total: f32 = weights.iter().sum();
        let probs = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / self.num_classes as f32; self.num_classes]
        };

        ScorerOutput::Probabilities(probs)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_identical_input() {
        let scorer = PlaceholderScorer::new(42);
        let pixels = vec![0.25f32; 3 * 8 * 8];

        let a = match scorer.score(&pixels) {
            ScorerOutput::Probabilities(p) => p,
            _ => panic!("expected probabilities"),
        };
        let b = match scorer.score(&pixels) {
            ScorerOutput::Probabilities(p) => p,
            _ => panic!("expected probabilities"),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_probabilities_are_normalized() {
        let scorer = PlaceholderScorer::new(7);
        let pixels = vec![0.6f32; 3 * 8 * 8];

        let probs = match scorer.score(&pixels) {
            ScorerOutput::Probabilities(p) => p,
            _ => panic!("expected probabilities"),
        };
        assert_eq!(probs.len(), NUM_CLASSES);
        let total: f32 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_different_images_usually_differ() {
        let scorer = PlaceholderScorer::new(42);
        let a = scorer.score(&vec![0.1f32; 192]);
        let b = scorer.score(&vec![0.9f32; 192]);
        let (ScorerOutput::Probabilities(a), ScorerOutput::Probabilities(b)) = (a, b) else {
            panic!("expected probabilities");
        };
        assert_ne!(a, b);
    }
}
