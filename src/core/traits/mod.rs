//! Trait definitions for the diagnostic pipeline.
//!
//! [`ImageScorer`] is the seam between orchestration and the vision model:
//! the trained ONNX classifier and the heuristic fallback both implement it,
//! and the orchestrator never branches on which one is installed.
//! [`RandomSource`] isolates the fallback's randomness so tests can pin it.

pub mod random;
pub mod scorer;

pub use random::RandomSource;
pub use scorer::ImageScorer;
