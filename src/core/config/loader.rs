//! Configuration file loading for the predictor.
//!
//! Supports TOML and JSON, detected from the file extension.

use super::errors::ConfigValidator;
use super::predictor::PredictorConfig;
use crate::core::errors::{DxError, DxResult};
use std::path::Path;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration loader for the predictor
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a file, auto-detecting the format from the extension
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use cancerdx::core::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load_from_file(Path::new("cancerdx.toml"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_from_file(path: &Path) -> DxResult<PredictorConfig> {
        let format = Self::format_for(path)?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            DxError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::load_from_string(&content, format)
    }

    /// Load and validate configuration from a string with the specified format
    pub fn load_from_string(content: &str, format: ConfigFormat) -> DxResult<PredictorConfig> {
        let config: PredictorConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| DxError::config_error(format!("Failed to parse TOML config: {e}")))?,
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| DxError::config_error(format!("Failed to parse JSON config: {e}")))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, auto-detecting the format from the extension
    pub fn save_to_file(config: &PredictorConfig, path: &Path) -> DxResult<()> {
        let format = Self::format_for(path)?;
        let content = Self::save_to_string(config, format)?;

        std::fs::write(path, content).map_err(|e| {
            DxError::config_error(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save configuration to a string with the specified format
    pub fn save_to_string(config: &PredictorConfig, format: ConfigFormat) -> DxResult<String> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| {
                DxError::config_error(format!("Failed to serialize config to TOML: {e}"))
            }),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                DxError::config_error(format!("Failed to serialize config to JSON: {e}"))
            }),
        }
    }

    fn format_for(path: &Path) -> DxResult<ConfigFormat> {
        ConfigFormat::from_extension(path).ok_or_else(|| {
            DxError::config_error(format!(
                "Unsupported config file extension: {:?}",
                path.extension()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::ResizeFilter;
    use std::path::PathBuf;

    #[test]
    fn test_config_format_detection() {
        assert_eq!(
            ConfigFormat::from_extension(Path::new("config.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension(Path::new("config.yaml")), None);
    }

    #[test]
    fn test_load_toml() {
        let content = r#"
            model_path = "models/rms.onnx"
            session_pool_size = 2
            score_timeout_ms = 5000

            [preprocessing]
            resize_filter = "Lanczos3"

            [fallback]
            seed = 42
        "#;

        let config = ConfigLoader::load_from_string(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.model_path, Some(PathBuf::from("models/rms.onnx")));
        assert_eq!(config.session_pool_size, 2);
        assert_eq!(config.score_timeout_ms, Some(5000));
        assert_eq!(config.preprocessing.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(config.fallback.seed, Some(42));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let result = ConfigLoader::load_from_string(
            r#"{"session_pool_size": 0}"#,
            ConfigFormat::Json,
        );
        assert!(matches!(result, Err(DxError::ConfigError { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = PredictorConfig::new()
            .with_model_path("models/rms.onnx")
            .with_fallback_seed(9);

        for name in ["cancerdx.toml", "cancerdx.json"] {
            let path = dir.path().join(name);
            ConfigLoader::save_to_file(&config, &path).unwrap();
            let loaded = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ConfigLoader::load_from_file(Path::new("config.ini"));
        assert!(result.is_err());
    }
}
