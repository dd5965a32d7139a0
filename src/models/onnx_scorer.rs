//! Trained vision classifier backed by ONNX Runtime.
//!
//! The exported network is a ResNet50 feature extractor followed by a
//! pooling, dense and sigmoid head; it emits one probability per image.

use crate::core::batch::{ImageBatch, Tensor2D, Tensor4D};
use crate::core::config::{ConfigValidator, PredictorConfig};
use crate::core::constants::{INPUT_CHANNELS, INPUT_HEIGHT, INPUT_WIDTH};
use crate::core::errors::{DxError, DxResult, SimpleError};
use crate::core::inference::OrtInfer;
use crate::core::traits::ImageScorer;
use crate::domain::ClinicalRecord;
use crate::processors::ChannelOrder;
use std::path::Path;
use tracing::info;

/// The loaded variant of the vision scorer.
///
/// Weights are immutable after load and the session pool serializes access
/// per session, so one instance is shared by every request.
#[derive(Debug)]
pub struct OnnxScorer {
    inference: OrtInfer,
    model_version: String,
}

impl OnnxScorer {
    /// Loads the classifier at `model_path`.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` if the file is missing, cannot be opened as an
    /// ONNX session, or declares an input incompatible with the configured
    /// 224x224x3 layout.
    pub fn load(config: &PredictorConfig, model_path: impl AsRef<Path>) -> DxResult<Self> {
        let model_path = model_path.as_ref();
        config.validate_model_path(model_path).map_err(|e| {
            DxError::model_load_error(
                model_path,
                "invalid model path",
                Some("check model_path or CANCERDX_MODEL_PATH"),
                Some(e),
            )
        })?;

        let inference = OrtInfer::from_config(config, model_path)?;
        if let Some(shape) = inference.primary_input_shape() {
            let expected = expected_input_shape(config.preprocessing.channel_order);
            check_input_shape(&shape, expected).map_err(|e| {
                DxError::model_load_error(
                    inference.model_path(),
                    "model input does not match the preprocessing layout",
                    Some("set preprocessing.channel_order to the layout the model was exported with"),
                    Some(e),
                )
            })?;
        }

        info!(
            "Opened '{}' with {} session(s), input '{}'",
            inference.model_name(),
            inference.pool_size(),
            inference.input_name()
        );
        Ok(Self::new(inference, config.model_version.clone()))
    }

    pub fn new(inference: OrtInfer, model_version: impl Into<String>) -> Self {
        Self {
            inference,
            model_version: model_version.into(),
        }
    }

    /// Runs inference on the stacked batch.
    pub fn infer(&self, batch_tensor: &Tensor4D) -> DxResult<Tensor2D> {
        self.inference
            .infer_2d(batch_tensor)
            .map_err(|e| match e {
                DxError::Scoring { .. } => e,
                other => DxError::scoring(
                    &self.model_version,
                    format!(
                        "failed to run inference on batch with shape {:?}",
                        batch_tensor.shape()
                    ),
                    other,
                ),
            })
    }
}

/// Per-image input shape, without the batch axis.
fn expected_input_shape(order: ChannelOrder) -> [usize; 3] {
    let (h, w) = (INPUT_HEIGHT as usize, INPUT_WIDTH as usize);
    match order {
        ChannelOrder::CHW => [INPUT_CHANNELS, h, w],
        ChannelOrder::HWC => [h, w, INPUT_CHANNELS],
    }
}

/// Checks a declared `[N, a, b, c]` model input against the per-image shape.
///
/// Dynamic dimensions (negative values) match anything.
fn check_input_shape(declared: &[i64], expected: [usize; 3]) -> Result<(), SimpleError> {
    if declared.len() != 4 {
        return Err(SimpleError::new(format!(
            "expected a rank-4 input, model declares {declared:?}"
        )));
    }
    let compatible = declared[1..]
        .iter()
        .zip(expected)
        .all(|(&d, e)| d < 0 || d as usize == e);
    if compatible {
        Ok(())
    } else {
        Err(SimpleError::new(format!(
            "model declares input {declared:?}, images are normalized to {expected:?}"
        )))
    }
}

impl ImageScorer for OnnxScorer {
    fn score(&self, batch: &ImageBatch, _clinical: &ClinicalRecord) -> DxResult<Vec<f32>> {
        let tensor = batch.to_tensor()?;
        let output = self.infer(&tensor)?;
        positive_probabilities(&output)
            .map_err(|e| DxError::scoring(&self.model_version, "unsupported model output", e))
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }
}

/// Reads the positive-class probability of each row of a model output.
///
/// A single column is taken as a sigmoid output; with two columns the
/// second one is the positive class. Values are clamped to [0, 1].
///
/// # Errors
///
/// Fails on any other column count and on non-finite values.
pub fn positive_probabilities(output: &Tensor2D) -> Result<Vec<f32>, SimpleError> {
    let column = match output.ncols() {
        1 => 0,
        2 => 1,
        n => {
            return Err(SimpleError::new(format!(
                "expected 1 or 2 output columns, got {n}"
            )));
        }
    };

    output
        .outer_iter()
        .enumerate()
        .map(|(row, values)| {
            let p = values[column];
            if p.is_finite() {
                Ok(p.clamp(0.0, 1.0))
            } else {
                Err(SimpleError::new(format!(
                    "non-finite score {p} for image {row}"
                )))
            }
        })
        .collect()
}
