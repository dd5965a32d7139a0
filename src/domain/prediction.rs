//! Prediction result types.

use crate::core::constants::DECISION_THRESHOLD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Binary diagnostic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionLabel {
    Positive,
    Negative,
}

impl PredictionLabel {
    /// Labels a confidence: strictly above 0.5 is positive, 0.5 itself is negative.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > DECISION_THRESHOLD {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one prediction request.
///
/// Created once per successful call and handed to the caller, who decides
/// whether to persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Label derived from `confidence`.
    pub label: PredictionLabel,
    /// Adjusted confidence, always within [0, 1].
    pub confidence: f64,
    /// Aggregated scorer output before the clinical adjustment.
    pub base_confidence: f64,
    /// Wall-clock time from the start of the call.
    pub processing_time_seconds: f64,
    /// Version tag of the scorer that produced `base_confidence`.
    pub model_version: String,
    /// Number of images in the request.
    pub image_count: usize,
    /// Names of the adjustment rules that fired.
    pub applied_rules: Vec<String>,
    /// The clinical payload as submitted.
    pub clinical_data: Value,
}
