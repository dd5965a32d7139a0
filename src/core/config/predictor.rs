//! Configuration for the diagnostic predictor.
//!
//! The scorer input geometry is fixed at 224x224x3 (see
//! [`crate::core::constants`]) and deliberately has no field here.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::OrtSessionConfig;
use crate::core::constants::{
    DEFAULT_FALLBACK_RANGE, DEFAULT_MODEL_VERSION, DEFAULT_SCORE_TIMEOUT_MS, DEFAULT_SCORE_WORKERS,
    FALLBACK_MODEL_VERSION, MODEL_PATH_ENV,
};
use crate::processors::{ChannelOrder, PreprocessMode, ResizeFilter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Image preprocessing settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Numeric transform applied to resized pixels.
    pub mode: PreprocessMode,
    /// Layout of each normalized image.
    pub channel_order: ChannelOrder,
    /// Interpolation used for resizing.
    pub resize_filter: ResizeFilter,
}

/// Settings for the heuristic scorer used when no model is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fixed seed for reproducible output; `None` uses thread-local entropy.
    pub seed: Option<u64>,
    /// Range the base probability is sampled from.
    pub base_range: (f32, f32),
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            seed: None,
            base_range: DEFAULT_FALLBACK_RANGE,
        }
    }
}

/// Top-level predictor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Path to the ONNX classifier; `None` selects the fallback scorer.
    pub model_path: Option<PathBuf>,
    /// Version tag reported for results of the trained model.
    pub model_version: String,
    /// Version tag reported for results of the fallback scorer.
    pub fallback_model_version: String,
    /// Model input tensor name (defaults to the first input of the graph).
    pub input_name: Option<String>,
    /// Model output tensor name (defaults to the first output of the graph).
    pub output_name: Option<String>,
    /// Number of ONNX sessions kept for concurrent requests (>= 1).
    pub session_pool_size: usize,
    /// Budget for one scoring call in milliseconds; `None` disables the limit.
    pub score_timeout_ms: Option<u64>,
    /// Worker threads running time-limited scoring calls (>= 1).
    pub score_workers: usize,
    /// Batches larger than this are normalized in parallel.
    pub parallel_threshold: Option<usize>,
    /// Image preprocessing settings.
    pub preprocessing: PreprocessConfig,
    /// Fallback scorer settings.
    pub fallback: FallbackConfig,
    /// ONNX Runtime session settings.
    pub ort_session: Option<OrtSessionConfig>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            fallback_model_version: FALLBACK_MODEL_VERSION.to_string(),
            input_name: None,
            output_name: None,
            session_pool_size: 1,
            score_timeout_ms: Some(DEFAULT_SCORE_TIMEOUT_MS),
            score_workers: DEFAULT_SCORE_WORKERS,
            parallel_threshold: None,
            preprocessing: PreprocessConfig::default(),
            fallback: FallbackConfig::default(),
            ort_session: None,
        }
    }
}

impl PredictorConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Sets the fallback seed.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback.seed = Some(seed);
        self
    }

    /// Sets the scoring time budget.
    ///
    /// Sub-millisecond budgets round up to 1 ms; `Duration::ZERO` is kept as
    /// zero and rejected by validation.
    pub fn with_score_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.score_timeout_ms =
            timeout.map(|t| u64::try_from(t.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX));
        self
    }

    /// Sets the number of scoring worker threads.
    pub fn with_score_workers(mut self, workers: usize) -> Self {
        self.score_workers = workers;
        self
    }

    /// Sets the ONNX session pool size.
    pub fn with_session_pool_size(mut self, size: usize) -> Self {
        self.session_pool_size = size;
        self
    }

    /// Replaces `model_path` with the value of `CANCERDX_MODEL_PATH` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_model_path_override(std::env::var_os(MODEL_PATH_ENV).map(PathBuf::from))
    }

    fn with_model_path_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            self.model_path = Some(path);
        }
        self
    }

    /// Returns the scoring time budget, if any.
    pub fn score_timeout(&self) -> Option<Duration> {
        self.score_timeout_ms.map(Duration::from_millis)
    }
}

impl ConfigValidator for PredictorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_pool_size == 0 {
            return Err(ConfigError::OutOfRange {
                field: "session_pool_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.score_workers == 0 {
            return Err(ConfigError::OutOfRange {
                field: "score_workers",
                message: "must be at least 1".to_string(),
            });
        }
        if self.score_timeout_ms == Some(0) {
            return Err(ConfigError::OutOfRange {
                field: "score_timeout_ms",
                message: "must be greater than 0 when set".to_string(),
            });
        }
        if self.model_version.trim().is_empty() || self.fallback_model_version.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "model version tags must not be empty".to_string(),
            });
        }
        if self.model_version == self.fallback_model_version {
            return Err(ConfigError::InvalidConfig {
                message: "fallback results must carry a distinct model version".to_string(),
            });
        }

        let (low, high) = self.fallback.base_range;
        self.validate_probability("fallback.base_range", low)?;
        self.validate_probability("fallback.base_range", high)?;
        if low > high {
            return Err(ConfigError::OutOfRange {
                field: "fallback.base_range",
                message: format!("lower bound {low} exceeds upper bound {high}"),
            });
        }

        if let PreprocessMode::ImageNet { scale, std, .. } = &self.preprocessing.mode {
            self.validate_positive_f32("preprocessing.scale", *scale)?;
            for s in std {
                self.validate_positive_f32("preprocessing.std", *s)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PredictorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model_version, "ResNet50-v2.1");
        assert_eq!(config.score_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.preprocessing.channel_order, ChannelOrder::HWC);
    }

    #[test]
    fn test_rejects_zero_pool_and_timeout() {
        let config = PredictorConfig::new().with_session_pool_size(0);
        assert!(config.validate().is_err());

        let mut config = PredictorConfig::new();
        config.score_timeout_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sub_millisecond_timeout_rounds_up() {
        let config = PredictorConfig::new().with_score_timeout(Some(Duration::from_micros(500)));
        assert_eq!(config.score_timeout_ms, Some(1));
        assert!(config.validate().is_ok());

        let config = PredictorConfig::new().with_score_timeout(Some(Duration::from_micros(1500)));
        assert_eq!(config.score_timeout(), Some(Duration::from_millis(2)));

        let config = PredictorConfig::new().with_score_timeout(Some(Duration::ZERO));
        assert!(config.validate().is_err());

        let config = PredictorConfig::new().with_score_timeout(None);
        assert_eq!(config.score_timeout(), None);
    }

    #[test]
    fn test_rejects_zero_score_workers() {
        let config = PredictorConfig::new().with_score_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_fallback_range() {
        let mut config = PredictorConfig::new();
        config.fallback.base_range = (0.9, 0.3);
        assert!(config.validate().is_err());

        config.fallback.base_range = (0.2, 1.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_shared_version_tags() {
        let mut config = PredictorConfig::new();
        config.fallback_model_version = config.model_version.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_std() {
        let mut config = PredictorConfig::new();
        config.preprocessing.mode = PreprocessMode::ImageNet {
            scale: 1.0 / 255.0,
            mean: [0.5; 3],
            std: [0.2, 0.0, 0.2],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_model_path_override() {
        let config = PredictorConfig::new()
            .with_model_path("a.onnx")
            .with_model_path_override(Some(PathBuf::from("b.onnx")));
        assert_eq!(config.model_path, Some(PathBuf::from("b.onnx")));

        let config = PredictorConfig::new()
            .with_model_path("a.onnx")
            .with_model_path_override(Some(PathBuf::new()));
        assert_eq!(config.model_path, Some(PathBuf::from("a.onnx")));

        let config = PredictorConfig::new().with_model_path_override(None);
        assert_eq!(config.model_path, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PredictorConfig =
            serde_json::from_str(r#"{"model_path": "models/rms.onnx", "fallback": {"seed": 7}}"#)
                .unwrap();
        assert_eq!(config.model_path, Some(PathBuf::from("models/rms.onnx")));
        assert_eq!(config.fallback.seed, Some(7));
        assert_eq!(config.fallback.base_range, (0.3, 0.9));
        assert_eq!(config.session_pool_size, 1);
    }
}
