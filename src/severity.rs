//! Disease severity scoring
//!
//! A deterministic heuristic mapping extracted image features to a 1-5
//! severity score, a named stage, and a description. The scorer is pure and
//! total over [`FeatureSet`]: the healthy bypass is the pipeline's decision
//! (it knows the predicted label, the scorer does not), expressed through
//! [`SeverityAnalysis::healthy`].

use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;

/// Named progression stage, bucketed from the severity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Healthy,
    #[serde(rename = "Early/Mild")]
    EarlyMild,
    Developing,
    Moderate,
    Advanced,
    Severe,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Healthy => "Healthy",
            Stage::EarlyMild => "Early/Mild",
            Stage::Developing => "Developing",
            Stage::Moderate => "Moderate",
            Stage::Advanced => "Advanced",
            Stage::Severe => "Severe",
        };
        write!(f, "{}", name)
    }
}

/// Fixed (stage, description) table indexed by severity score 1-5
const STAGES: [(Stage, &str); 5] = [
    (
        Stage::EarlyMild,
        "Initial symptoms, minimal spread, good prognosis with intervention",
    ),
    (
        Stage::Developing,
        "Clear symptoms, disease establishing, intervention recommended",
    ),
    (
        Stage::Moderate,
        "Well-established infection, moderate spread, treatment necessary",
    ),
    (
        Stage::Advanced,
        "Extensive symptoms, significant damage, urgent treatment needed",
    ),
    (
        Stage::Severe,
        "Critical infection, may be irreversible damage, immediate intervention required",
    ),
];

/// Stage and description for a severity score in 1-5
pub fn stage_for_score(score: u8) -> Option<(Stage, &'static str)> {
    match score {
        1..=5 => Some(STAGES[(score - 1) as usize]),
        _ => None,
    }
}

/// Mean HSV channel values reported alongside a diseased verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMetrics {
    pub mean_hue: f64,
    pub mean_saturation: f64,
    pub mean_value: f64,
}

/// Severity verdict for a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAnalysis {
    /// 0 for healthy, otherwise 1-5
    pub severity_score: u8,
    /// Stage bucketed from the score
    pub stage: Stage,
    /// Human-readable description of the stage
    pub description: String,
    /// Diseased-pixel area percentage, rounded to 1 decimal
    pub affected_area_percent: f64,
    /// GLCM contrast, rounded to 3 decimals
    pub texture_complexity: f64,
    /// Mean HSV channels; absent for the healthy verdict
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color_metrics: Option<ColorMetrics>,
}

impl SeverityAnalysis {
    /// The fixed verdict for a healthy prediction. Feature-based scoring is
    /// skipped entirely for healthy labels.
    pub fn healthy() -> Self {
        Self {
            severity_score: 0,
            stage: Stage::Healthy,
            description: "No disease detected".to_string(),
            affected_area_percent: 0.0,
            texture_complexity: 0.0,
            color_metrics: None,
        }
    }

    /// Score a diseased leaf from its extracted features.
    ///
    /// Contributions: affected area <5% -> 0, <15% -> 1, <30% -> 2,
    /// <50% -> 3, else 4; contrast <0.1 -> 0, <0.3 -> 0.5, <0.6 -> 1,
    /// else 1.5. The +1 offset guarantees a minimum score of 1 for any
    /// non-healthy verdict. Ties round to even.
    pub fn from_features(features: &FeatureSet) -> Self {
        let area = features.affected_area_percent;
        let base: f64 = if area < 5.0 {
            0.0
        } else if area < 15.0 {
            1.0
        } else if area < 30.0 {
            2.0
        } else if area < 50.0 {
            3.0
        } else {
            4.0
        };

        let texture = if features.contrast < 0.1 {
            0.0
        } else if features.contrast < 0.3 {
            0.5
        } else if features.contrast < 0.6 {
            1.0
        } else {
            1.5
        };

        let score = (base + texture + 1.0).round_ties_even().clamp(1.0, 5.0) as u8;
        let (stage, description) = STAGES[(score - 1) as usize];

        Self {
            severity_score: score,
            stage,
            description: description.to_string(),
            affected_area_percent: round1(area),
            texture_complexity: round3(features.contrast),
            color_metrics: Some(ColorMetrics {
                mean_hue: round1(features.mean_hue),
                mean_saturation: round1(features.mean_saturation),
                mean_value: round1(features.mean_value),
            }),
        }
    }
}

/// Recommended action list for a severity score, reported by the CLI
pub fn recommended_actions(score: u8) -> &'static [&'static str] {
    match score {
        0 => &["No disease treatment necessary"],
        1 | 2 => &[
            "Monitor the plant for disease progression",
            "Consider preventative treatments",
            "Improve plant growing conditions",
        ],
        3 | 4 => &[
            "Apply appropriate treatment for the identified disease",
            "Remove severely affected leaves",
            "Adjust watering and nutrient schedule",
            "Isolate plant if disease is contagious",
        ],
        _ => &[
            "Urgent treatment required",
            "Consider removing severely affected plant parts",
            "Isolate plant to prevent spread",
            "Consult with a plant pathologist if available",
        ],
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(affected: f64, contrast: f64) -> FeatureSet {
        FeatureSet {
            mean_hue: 25.0,
            mean_saturation: 120.0,
            mean_value: 140.0,
            affected_area_percent: affected,
            contrast,
            dissimilarity: contrast / 2.0,
        }
    }

    #[test]
    fn test_stage_table() {
        let expected = [
            (1, Stage::EarlyMild),
            (2, Stage::Developing),
            (3, Stage::Moderate),
            (4, Stage::Advanced),
            (5, Stage::Severe),
        ];
        for (score, stage) in expected {
            let (s, desc) = stage_for_score(score).unwrap();
            assert_eq!(s, stage);
            assert!(!desc.is_empty());
        }
        assert_eq!(stage_for_score(0), None);
        assert_eq!(stage_for_score(6), None);
    }

    #[test]
    fn test_healthy_verdict() {
        let healthy = SeverityAnalysis::healthy();
        assert_eq!(healthy.severity_score, 0);
        assert_eq!(healthy.stage, Stage::Healthy);
        assert_eq!(healthy.affected_area_percent, 0.0);
        assert_eq!(healthy.texture_complexity, 0.0);
        assert!(healthy.color_metrics.is_none());
    }

    #[test]
    fn test_minimum_score_is_one() {
        // No measured symptoms at all still scores 1 for a diseased label
        let analysis = SeverityAnalysis::from_features(&features(0.0, 0.0));
        assert_eq!(analysis.severity_score, 1);
        assert_eq!(analysis.stage, Stage::EarlyMild);
    }

    #[test]
    fn test_boundary_just_below_thresholds() {
        // 4.9% area and 0.05 contrast both fall in the zero buckets
        let analysis = SeverityAnalysis::from_features(&features(4.9, 0.05));
        assert_eq!(analysis.severity_score, 1);
        assert_eq!(analysis.stage, Stage::EarlyMild);
    }

    #[test]
    fn test_boundary_half_rounds_up_to_advanced() {
        // base 2 + texture 0.5 + 1 = 3.5, ties-to-even -> 4
        let analysis = SeverityAnalysis::from_features(&features(29.9, 0.29));
        assert_eq!(analysis.severity_score, 4);
        assert_eq!(analysis.stage, Stage::Advanced);
    }

    #[test]
    fn test_maximum_is_clamped_to_five() {
        let analysis = SeverityAnalysis::from_features(&features(90.0, 2.0));
        assert_eq!(analysis.severity_score, 5);
        assert_eq!(analysis.stage, Stage::Severe);
    }

    #[test]
    fn test_score_bounds_over_grid() {
        for &area in &[0.0, 4.9, 5.0, 14.9, 15.0, 29.9, 30.0, 49.9, 50.0, 100.0] {
            for &contrast in &[0.0, 0.09, 0.1, 0.29, 0.3, 0.59, 0.6, 5.0] {
                let analysis = SeverityAnalysis::from_features(&features(area, contrast));
                assert!((1..=5).contains(&analysis.severity_score));
                assert_eq!(
                    stage_for_score(analysis.severity_score).unwrap().0,
                    analysis.stage
                );
            }
        }
    }

    #[test]
    fn test_rounded_reporting() {
        let analysis = SeverityAnalysis::from_features(&features(12.3456, 0.123456));
        assert_eq!(analysis.affected_area_percent, 12.3);
        assert_eq!(analysis.texture_complexity, 0.123);
        let color = analysis.color_metrics.unwrap();
        assert_eq!(color.mean_hue, 25.0);
    }

    #[test]
    fn test_serde_stage_names() {
        let json = serde_json::to_string(&Stage::EarlyMild).unwrap();
        assert_eq!(json, "\"Early/Mild\"");
        let json = serde_json::to_string(&Stage::Severe).unwrap();
        assert_eq!(json, "\"Severe\"");
    }

    #[test]
    fn test_healthy_json_omits_color_metrics() {
        let value = serde_json::to_value(SeverityAnalysis::healthy()).unwrap();
        assert!(value.get("color_metrics").is_none());
        assert_eq!(value["severity_score"], 0);
    }
}
