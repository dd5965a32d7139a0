//! # cancerdx
//!
//! A histopathology prediction pipeline: a batch of slide images plus a
//! clinical record goes in, one binary diagnostic label with a confidence
//! comes out.
//!
//! ## Pipeline
//!
//! 1. **Image normalization**: decode, convert to RGB, resize to 224x224 and
//!    apply the classifier's numeric preprocessing
//! 2. **Vision scoring**: an ONNX ResNet50 classifier, or a heuristic
//!    fallback when no model can be loaded
//! 3. **Clinical risk adjustment**: an auditable table of additive nudges
//! 4. **Thresholding**: confidence strictly above 0.5 is `positive`
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants, ONNX Runtime integration and traits
//! * [`domain`] - Request and response value types
//! * [`models`] - Scorer implementations
//! * [`predictors`] - The orchestrator, the adjuster and scorer startup
//! * [`processors`] - Image normalization
//! * [`store`] - The prediction log
//! * [`utils`] - Image decoding helpers and random sources
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cancerdx::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PredictorConfig::new().with_model_path("models/resnet50.onnx");
//! let loaded = load_scorer(&config);
//!
//! let predictor = DiagnosticPredictor::builder()
//!     .config(config)
//!     .loaded_scorer(&loaded)
//!     .build()?;
//!
//! let images = vec![ImageAsset::from_path("slides/biopsy.png")?];
//! let result = predictor.predict(&images, &json!({"age": 15, "tumorSite": "head-neck"}))?;
//! println!("{} ({:.2})", result.label, result.confidence);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod domain;
pub mod models;
pub mod predictors;
pub mod processors;
pub mod store;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use cancerdx::prelude::*;
/// ```
///
/// Includes the predictor and its builder, scorer startup, configuration,
/// the request and result types, and the error types.
pub mod prelude {
    pub use crate::core::config::{ConfigLoader, PredictorConfig};
    pub use crate::core::{DxError, DxResult, ErrorKind, ImageScorer, init_tracing};
    pub use crate::domain::{ClinicalRecord, ImageAsset, PredictionLabel, PredictionResult};
    pub use crate::predictors::{
        ClinicalRiskAdjuster, DiagnosticPredictor, LoadedScorer, ScorerAvailability, ScorerCell,
        load_scorer,
    };
    pub use crate::store::{InMemoryPredictionStore, NewPredictionLog, PredictionStore};
}
