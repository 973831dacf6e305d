use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Classification returned by the inference service for one artifact.
///
/// Read-only once produced; superseded by any new acquisition. Field names
/// match the service's `/predict` response schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub label: String,
    pub confidence: f32,
    /// Per-class probability map, when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<HashMap<String, f32>>,
    /// Server-side inference time in milliseconds, for observability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_ms: Option<f64>,
}

impl InferenceResult {
    pub fn severity(&self) -> Severity {
        Severity::classify(&self.label, self.confidence)
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Free-text guidance returned by the recommendation service, stored
/// verbatim. Lives only as long as its parent inference result is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub text: String,
}

/// Display-only triage class derived from an inference result.
///
/// Drives visual severity styling, nothing else. The suspicious/malignant
/// split on raw confidence is carried over from the product's screening UI
/// and is not clinically validated; it must not be read as a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Benign,
    Suspicious,
    Malignant,
}

/// Non-benign labels below this confidence are styled as suspicious rather
/// than malignant.
const SUSPICIOUS_CONFIDENCE_CEILING: f32 = 0.65;

impl Severity {
    /// Pure, total classification over any label/confidence pair.
    pub fn classify(label: &str, confidence: f32) -> Self {
        if label.to_lowercase().contains("benign") {
            Self::Benign
        } else if confidence < SUSPICIOUS_CONFIDENCE_CEILING {
            Self::Suspicious
        } else {
            Self::Malignant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benign => "benign",
            Self::Suspicious => "suspicious",
            Self::Malignant => "malignant",
        }
    }
}

/// Confidence band used for guidance copy. Half-open intervals, except the
/// top band is closed: [0, 0.4) low, [0.4, 0.7) moderate, [0.7, 1.0] high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
}

impl ConfidenceBand {
    /// Total over all confidence values; forms a non-overlapping partition
    /// of [0, 1].
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence < 0.4 {
            Self::Low
        } else if confidence < 0.7 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Fixed advisory message shown alongside the band.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Low => {
                "Low model confidence. Treat this result as inconclusive and seek a clinical evaluation."
            }
            Self::Moderate => {
                "Moderate model confidence. A dermatologist review is recommended to confirm this result."
            }
            Self::High => {
                "High model confidence. Confirm with a dermatologist before acting on this result."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}
