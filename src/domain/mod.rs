//! Domain-level structures shared across the diagnostic pipeline.
//!
//! This module groups the request and response value types: uploaded
//! images, the clinical record that accompanies them, and the prediction
//! result handed back to the caller.

pub mod clinical;
pub mod image_asset;
pub mod prediction;

pub use clinical::{ClinicalRecord, HIGH_RISK_SYMPTOMS, HIGH_RISK_TUMOR_SITES};
pub use image_asset::{ImageAsset, joined_filenames};
pub use prediction::{PredictionLabel, PredictionResult};
