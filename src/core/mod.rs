//! The core module of the diagnostic pipeline.
//!
//! This module contains the fundamental components shared by every stage:
//! - Batched scorer input
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - ONNX Runtime integration
//! - Traits defining the scorer and randomness seams
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod batch;
pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;

pub use batch::{ImageBatch, Tensor2D, Tensor3D, Tensor4D};
pub use config::{ConfigError, ConfigLoader, ConfigValidator, PredictorConfig};
pub use constants::*;
pub use errors::{DxError, DxResult, ErrorKind, ProcessingStage};
pub use inference::OrtInfer;
pub use traits::{ImageScorer, RandomSource};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
