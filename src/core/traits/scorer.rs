//! The scorer capability.

use crate::core::batch::ImageBatch;
use crate::core::errors::DxResult;
use crate::domain::ClinicalRecord;

/// Produces a probability of the positive class from normalized images.
///
/// Implementations are shared by concurrent requests, so `score` must not
/// mutate shared state beyond what interior synchronization allows.
pub trait ImageScorer: Send + Sync + std::fmt::Debug {
    /// Scores a batch.
    ///
    /// Returns either one probability per image or a single probability for
    /// the whole batch. The clinical record is available for scorers that
    /// take it into account; image models ignore it.
    fn score(&self, batch: &ImageBatch, clinical: &ClinicalRecord) -> DxResult<Vec<f32>>;

    /// Version tag reported in results produced by this scorer.
    fn model_version(&self) -> &str;

    /// True for the heuristic used when no trained model is available.
    fn is_fallback(&self) -> bool {
        false
    }
}
