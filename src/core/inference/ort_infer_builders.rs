use super::*;
use crate::core::config::PredictorConfig;
use ort::logging::LogLevel;
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;

impl OrtInfer {
    /// Creates a session pool from predictor settings.
    ///
    /// The pool size, ORT session options and tensor names come from
    /// `config`; the model name reported in errors is the configured model
    /// version. When no input name is configured, the first input declared
    /// by the model is used.
    ///
    /// # Errors
    ///
    /// Returns `DxError::ModelLoad` if the file is missing or ONNX Runtime
    /// rejects it.
    pub fn from_config(config: &PredictorConfig, model_path: impl AsRef<Path>) -> DxResult<Self> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(DxError::model_load_error(
                path,
                "model file not found",
                Some("check the configured model path"),
                None::<DxError>,
            ));
        }

        let pool_size = config.session_pool_size.max(1);
        let mut sessions = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let builder = Session::builder()?;
            let builder = if let Some(cfg) = &config.ort_session {
                Self::apply_ort_config(builder, cfg)?
            } else {
                builder.with_log_level(LogLevel::Error)?
            };
            let session = builder.commit_from_file(path).map_err(|e| {
                DxError::model_load_error(
                    path,
                    "failed to create ONNX session",
                    Some("check device/EP configuration and model file"),
                    Some(e),
                )
            })?;
            sessions.push(Mutex::new(session));
        }

        let input_name = match &config.input_name {
            Some(name) => name.clone(),
            None => Self::discover_input_name(&sessions, path)?,
        };

        tracing::debug!(
            "Loaded '{}' from {} with {} session(s), input '{}'",
            config.model_version,
            path.display(),
            sessions.len(),
            input_name
        );

        Ok(OrtInfer {
            sessions,
            next_idx: std::sync::atomic::AtomicUsize::new(0),
            input_name,
            output_name: config.output_name.clone(),
            model_path: path.to_path_buf(),
            model_name: config.model_version.clone(),
        })
    }

    fn discover_input_name(sessions: &[Mutex<Session>], path: &Path) -> DxResult<String> {
        let first = sessions
            .first()
            .and_then(|s| s.lock().ok())
            .and_then(|s| s.inputs.first().map(|input| input.name.clone()));
        first.ok_or_else(|| {
            DxError::model_load_error(
                path,
                "model declares no inputs",
                Some("export the model with a named image input"),
                None::<DxError>,
            )
        })
    }
}
