//! Heuristic scorer used when no trained model is available.
//!
//! It samples a base probability and nudges it with the same clinical
//! fields the risk adjuster reads, with its own magnitudes. The adjuster
//! still runs on top of this output, so the fallback path is adjusted
//! twice.

use crate::core::batch::ImageBatch;
use crate::core::config::FallbackConfig;
use crate::core::errors::DxResult;
use crate::core::traits::{ImageScorer, RandomSource};
use crate::domain::ClinicalRecord;
use crate::utils::random::random_source;

/// Bonus when the patient is 10 to 25 years old, inclusive.
const AGE_BAND_BONUS: f32 = 0.10;
const AGE_BAND: (u32, u32) = (10, 25);
const HIGH_RISK_SITE_BONUS: f32 = 0.15;
/// Bonus per distinct high-risk symptom.
const SYMPTOM_BONUS: f32 = 0.10;

/// Demo-mode scorer producing plausible but model-free output.
///
/// Reports its own version tag so results are distinguishable from those of
/// the trained classifier.
#[derive(Debug)]
pub struct HeuristicScorer {
    random: Box<dyn RandomSource>,
    base_range: (f32, f32),
    model_version: String,
}

impl HeuristicScorer {
    pub fn new(
        random: Box<dyn RandomSource>,
        base_range: (f32, f32),
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            random,
            base_range,
            model_version: model_version.into(),
        }
    }

    /// Builds the scorer from config, seeding it when a seed is set.
    pub fn from_config(config: &FallbackConfig, model_version: impl Into<String>) -> Self {
        Self::new(random_source(config.seed), config.base_range, model_version)
    }

    /// Scores a clinical record. Images do not influence the result.
    pub fn estimate(&self, clinical: &ClinicalRecord) -> f32 {
        let (low, high) = self.base_range;
        let mut probability = self.random.uniform(low, high);

        if clinical.age_within(AGE_BAND.0, AGE_BAND.1) {
            probability += AGE_BAND_BONUS;
        }
        if clinical.has_high_risk_site() {
            probability += HIGH_RISK_SITE_BONUS;
        }
        probability += SYMPTOM_BONUS * clinical.high_risk_symptom_count() as f32;

        probability.clamp(0.0, 1.0)
    }
}

impl ImageScorer for HeuristicScorer {
    fn score(&self, _batch: &ImageBatch, clinical: &ClinicalRecord) -> DxResult<Vec<f32>> {
        Ok(vec![self.estimate(clinical)])
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn is_fallback(&self) -> bool {
        true
    }
}
