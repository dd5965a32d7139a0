//! Prediction orchestration.
//!
//! This module wires the image normalizer, the vision scorer and the
//! clinical risk adjuster into a single [`DiagnosticPredictor`], and owns
//! the one-time scorer selection performed at startup.

pub mod adjuster;
pub mod diagnostic;
pub mod startup;
pub mod stats;

pub use adjuster::{
    Adjustment, AdjustmentRule, ClinicalRiskAdjuster, STANDARD_RULES, round_confidence,
};
pub use diagnostic::{DiagnosticPredictor, DiagnosticPredictorBuilder, aggregate_scores};
pub use startup::{LoadedScorer, ScorerAvailability, ScorerCell, load_scorer, load_scorer_with_random};
pub use stats::{PredictorStats, StatsManager};
