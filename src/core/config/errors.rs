//! Configuration error types and validation traits.

use crate::core::errors::DxError;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a model path does not exist.
    #[error("model path does not exist: {path}")]
    ModelPathNotFound { path: std::path::PathBuf },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that a value is outside its allowed range.
    #[error("{field} out of range: {message}")]
    OutOfRange { field: &'static str, message: String },
}

impl From<ConfigError> for DxError {
    fn from(err: ConfigError) -> Self {
        DxError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates a model path.
    ///
    /// This method checks that the model path exists and is a file.
    fn validate_model_path(&self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            Err(ConfigError::ModelPathNotFound {
                path: path.to_path_buf(),
            })
        } else if !path.is_file() {
            Err(ConfigError::InvalidConfig {
                message: format!("Model path is not a file: {}", path.display()),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a probability lies in the closed unit interval.
    fn validate_probability(&self, field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                message: format!("{value} is not within [0, 1]"),
            })
        }
    }

    /// Validates that a value is finite and strictly positive.
    fn validate_positive_f32(&self, field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                message: format!("{value} must be greater than 0"),
            })
        }
    }
}
