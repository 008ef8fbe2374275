//! Classification over the disease catalog
//!
//! The scoring model is an injectable strategy behind the [`ClassScorer`]
//! trait: the pipeline never depends on a specific model implementation,
//! and tests inject deterministic stubs. The [`Classifier`] wrapper owns
//! everything mechanical (argmax, top-k ranking, confidence percentages,
//! and clamping of out-of-range class indices), so every scorer gets the
//! same catalog-bounded contract.

pub mod placeholder;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::NUM_CLASSES;

pub use placeholder::PlaceholderScorer;

/// Number of ranked predictions reported per verdict
pub const TOP_K: usize = 3;

/// Default confidence percentages when a scorer yields a bare index and no
/// probability distribution: predicted class first, then two fillers.
const FALLBACK_CONFIDENCES: [f32; TOP_K] = [30.0, 20.0, 10.0];

/// Output of a scoring strategy for one image
#[derive(Debug, Clone)]
pub enum ScorerOutput {
    /// Per-class probabilities (need not be normalized; ranked as-is)
    Probabilities(Vec<f32>),
    /// A bare class index from a model without per-class probabilities
    Index(usize),
}

/// A multi-class scoring strategy over the disease catalog.
///
/// Implementations must be deterministic for identical pixel input and must
/// not fail for well-formed input. Loaded once at process start and shared
/// read-only across predictions.
pub trait ClassScorer: Send + Sync {
    /// Score a flattened normalized image (HWC, values in [0,1])
    fn score(&self, pixels: &[f32]) -> ScorerOutput;

    /// Number of classes this scorer was built for
    fn num_classes(&self) -> usize;
}

/// One ranked entry of the top-k list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClass {
    /// Class index into the disease catalog
    pub class_index: usize,
    /// Confidence percentage in [0,100]
    pub confidence: f32,
}

/// Raw classification outcome, before label resolution
#[derive(Debug, Clone)]
pub struct Classification {
    /// Predicted class index, always within catalog bounds
    pub class_index: usize,
    /// Confidence percentage of the predicted class
    pub confidence: f32,
    /// Top-k distinct classes, predicted class first
    pub top: Vec<RankedClass>,
    /// True when the scorer produced an out-of-range index that was
    /// redirected to class 0
    pub clamped: bool,
}

/// Catalog-bounded classifier wrapping an injected scoring strategy
#[derive(Clone)]
pub struct Classifier {
    scorer: Arc<dyn ClassScorer>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

impl Classifier {
    /// Wrap a scoring strategy. The scorer's class count must match the
    /// catalog; a mismatched model cannot serve predictions.
    pub fn new(scorer: Arc<dyn ClassScorer>) -> crate::Result<Self> {
        if scorer.num_classes() != NUM_CLASSES {
            return Err(crate::LeafscanError::ModelUnavailable(format!(
                "scorer produces {} classes, catalog has {}",
                scorer.num_classes(),
                NUM_CLASSES
            )));
        }
        Ok(Self { scorer })
    }

    /// Classify a flattened normalized image
    pub fn classify(&self, pixels: &[f32]) -> Classification {
        match self.scorer.score(pixels) {
            ScorerOutput::Probabilities(probs) => Self::rank_probabilities(&probs),
            ScorerOutput::Index(idx) => Self::rank_index(idx),
        }
    }

    fn rank_probabilities(probs: &[f32]) -> Classification {
        let mut indexed: Vec<(usize, f32)> = probs
            .iter()
            .take(NUM_CLASSES)
            .enumerate()
            .map(|(i, &p)| (i, p))
            .collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if indexed.len() < TOP_K {
            // Degenerate scorer output: not enough classes to rank.
            // Recover with the index fallback scheme instead of failing.
            warn!(
                scored = indexed.len(),
                "scorer returned a truncated probability vector, using fallback ranking"
            );
            let best = indexed.first().map(|&(i, _)| i).unwrap_or(0);
            let mut classification = Self::rank_index(best);
            classification.clamped = true;
            return classification;
        }

        let top: Vec<RankedClass> = indexed
            .iter()
            .take(TOP_K)
            .map(|&(class_index, p)| RankedClass {
                class_index,
                confidence: (p * 100.0).clamp(0.0, 100.0),
            })
            .collect();

        Classification {
            class_index: top[0].class_index,
            confidence: top[0].confidence,
            top,
            clamped: false,
        }
    }

    /// Rank for an index-only scorer: the predicted class first with the
    /// default confidence, then distinct pseudo-random fillers. Filler
    /// choice is seeded by the predicted index, so the ranking is
    /// deterministic per prediction.
    fn rank_index(idx: usize) -> Classification {
        let (idx, clamped) = if idx >= NUM_CLASSES {
            warn!(
                predicted = idx,
                catalog = NUM_CLASSES,
                "predicted class index out of catalog range, redirecting to class 0"
            );
            (0, true)
        } else {
            (idx, false)
        };

        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(idx as u64 ^ 0x9e37_79b9_7f4a_7c15);
        let others: Vec<usize> = (0..NUM_CLASSES).filter(|&i| i != idx).collect();
        let fillers = others.choose_multiple(&mut rng, TOP_K - 1);

        let mut top = vec![RankedClass {
            class_index: idx,
            confidence: FALLBACK_CONFIDENCES[0],
        }];
        for (slot, &class_index) in fillers.enumerate() {
            top.push(RankedClass {
                class_index,
                confidence: FALLBACK_CONFIDENCES[slot + 1],
            });
        }

        Classification {
            class_index: idx,
            confidence: FALLBACK_CONFIDENCES[0],
            top,
            clamped,
        }
    }
}
