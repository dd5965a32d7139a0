//! ONNX Runtime integration for the vision scorer.

pub mod ort_infer;

pub use ort_infer::OrtInfer;
