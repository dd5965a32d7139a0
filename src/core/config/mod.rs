//! Configuration management for the diagnostic predictor.
//!
//! This module provides configuration types, validation traits, and
//! file loading for predictor configurations.

pub mod errors;
pub mod loader;
pub mod onnx;
pub mod predictor;

// Re-export commonly used types
pub use errors::{ConfigError, ConfigValidator};
pub use loader::{ConfigFormat, ConfigLoader};
pub use onnx::*;
pub use predictor::{FallbackConfig, PredictorConfig, PreprocessConfig};
