//! Core ONNX Runtime inference engine with support for pooling and configurable sessions.

use crate::core::{
    batch::{Tensor2D, Tensor4D},
    errors::{DxError, DxResult},
};
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_config.rs"]
mod ort_infer_config;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// A pool of ONNX Runtime sessions for one model file.
///
/// Calls are spread over the pool round-robin; each session is guarded by
/// its own mutex, so concurrent requests only contend when the pool is
/// smaller than the number of callers.
pub struct OrtInfer {
    pub(super) sessions: Vec<Mutex<Session>>,
    pub(super) next_idx: std::sync::atomic::AtomicUsize,
    pub(super) input_name: String,
    pub(super) output_name: Option<String>,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Declared shape of the input tensor fed on every call.
    ///
    /// `None` when the graph has no tensor input of that name. Dynamic
    /// dimensions are negative.
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session = self.sessions.first()?.lock().ok()?;
        let input = session
            .inputs
            .iter()
            .find(|input| input.name == self.input_name)?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Number of sessions in the pool.
    pub fn pool_size(&self) -> usize {
        self.sessions.len()
    }

    /// Name of the input tensor fed on every call.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }
}
