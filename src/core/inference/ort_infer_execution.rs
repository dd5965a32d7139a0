use super::*;
use crate::core::errors::SimpleError;
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    /// Returns the configured or discovered output tensor name.
    fn get_output_name(&self) -> DxResult<String> {
        if let Some(ref name) = self.output_name {
            return Ok(name.clone());
        }
        let session = self.sessions[0].lock().map_err(|_| {
            DxError::scoring(
                &self.model_name,
                "failed to acquire session lock",
                SimpleError::new("session lock poisoned"),
            )
        })?;
        session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                DxError::scoring(
                    &self.model_name,
                    "no outputs available in session",
                    SimpleError::new("model may be invalid or corrupted"),
                )
            })
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn run_inference_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> DxResult<T>,
    ) -> DxResult<T> {
        let input_shape = x.shape().to_vec();
        let output_name = self.get_output_name()?;

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            DxError::scoring(
                &self.model_name,
                format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let idx = self
            .next_idx
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            % self.sessions.len();
        let mut session_guard = self.sessions[idx].lock().map_err(|_| {
            DxError::scoring(
                &self.model_name,
                format!(
                    "failed to acquire session lock for session {}/{}",
                    idx,
                    self.sessions.len()
                ),
                SimpleError::new("session lock acquisition failed"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            DxError::scoring(
                &self.model_name,
                format!(
                    "ONNX Runtime inference failed with input '{}' -> output '{}' (shape {:?})",
                    self.input_name, output_name, input_shape
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                DxError::scoring(
                    &self.model_name,
                    format!("failed to extract output tensor '{output_name}' as f32"),
                    e,
                )
            })?;

        processor(output_shape, output_data)
    }

    /// Runs the model and returns a `[batch, classes]` output.
    ///
    /// # Errors
    ///
    /// Returns `DxError::Scoring` if the run fails or the output is not
    /// two-dimensional.
    pub fn infer_2d(&self, x: &Tensor4D) -> DxResult<Tensor2D> {
        let model_name = self.model_name.clone();
        self.run_inference_with_processor(x, move |output_shape, output_data| {
            if output_shape.len() != 2 {
                return Err(DxError::scoring(
                    model_name,
                    "unexpected output rank",
                    SimpleError::new(format!(
                        "expected 2D output, got shape {output_shape:?}"
                    )),
                ));
            }

            let batch_size_out = output_shape[0] as usize;
            let num_classes = output_shape[1] as usize;
            let array_view = ArrayView2::from_shape((batch_size_out, num_classes), output_data)?;
            Ok(array_view.to_owned())
        })
    }
}
