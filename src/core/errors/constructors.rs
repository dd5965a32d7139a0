//! Constructor helpers for [`DxError`].
//!
//! These keep call sites short and make sure every error carries the
//! context a caller needs to log it.

use super::{DxError, ImageProcessError, ScoringTimeout};
use std::time::Duration;

impl DxError {
    /// Creates an error for malformed clinical data.
    pub fn invalid_clinical_data(message: impl Into<String>) -> Self {
        Self::InvalidClinicalData {
            message: message.into(),
        }
    }

    /// Creates an error for an image that failed normalization.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based position of the image in the request.
    /// * `filename` - Declared filename of the image.
    /// * `source` - The normalization failure; its stage is recorded on the error.
    pub fn image_processing(
        index: usize,
        filename: impl Into<String>,
        source: ImageProcessError,
    ) -> Self {
        Self::ImageProcessing {
            index,
            filename: filename.into(),
            stage: source.stage(),
            source,
        }
    }

    /// Creates an error for a failed scorer invocation.
    pub fn scoring(
        model_version: impl Into<String>,
        context: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Scoring {
            model_version: model_version.into(),
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an error for a scorer that exceeded its time budget.
    pub fn scoring_timeout(model_version: impl Into<String>, limit: Duration) -> Self {
        Self::scoring(
            model_version,
            "scorer exceeded the per-request time budget",
            ScoringTimeout { limit },
        )
    }

    /// Creates a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a configuration error naming the offending field.
    ///
    /// # Arguments
    ///
    /// * `field` - The configuration field.
    /// * `value` - The rejected value, as text.
    /// * `reason` - Why the value was rejected.
    pub fn config_error_with_context(field: &str, value: &str, reason: &str) -> Self {
        Self::ConfigError {
            message: format!("invalid value '{value}' for '{field}': {reason}"),
        }
    }

    /// Creates an error for model load failures with an optional suggestion.
    ///
    /// # Arguments
    /// * `model_path` - Path to the model file
    /// * `reason` - Short reason description
    /// * `suggestion` - Optional suggestion message (without punctuation)
    /// * `source` - Optional underlying error
    pub fn model_load_error(
        model_path: impl AsRef<std::path::Path>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        Self::ModelLoad {
            path: model_path.as_ref().to_path_buf(),
            reason: reason.into(),
            suggestion: suggestion.map(str::to_string),
            source: source.map(|e| Box::new(e) as _),
        }
    }

    /// Creates an error for a rejected prediction log operation.
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
