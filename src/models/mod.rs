//! Scorer implementations.
//!
//! Two variants sit behind [`ImageScorer`](crate::core::traits::ImageScorer):
//! the trained ONNX classifier and the heuristic used when it cannot be
//! loaded.

pub mod fallback;
pub mod onnx_scorer;

pub use fallback::HeuristicScorer;
pub use onnx_scorer::{OnnxScorer, positive_probabilities};
