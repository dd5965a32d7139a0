//! Error types for the diagnostic pipeline.
//!
//! Request-time failures (`EmptyInput`, `InvalidClinicalData`,
//! `ImageProcessing`, `Scoring`) are distinguishable variants so that a
//! transport layer can map them to user-facing codes through
//! [`DxError::kind`]. Model loading failures are reported through
//! `ModelLoad` at startup and never surface from a prediction call.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

mod constructors;

/// Stage of image normalization in which an image failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Bytes could not be decoded into a pixel grid.
    Decode,
    /// The decoded image could not be resized to the model geometry.
    Resize,
    /// The numeric preprocessing produced an unexpected tensor.
    Normalization,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Decode => write!(f, "decode"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
        }
    }
}

/// Failure while turning one uploaded image into a model-ready tensor.
#[derive(Error, Debug)]
pub enum ImageProcessError {
    /// The payload had no bytes at all.
    #[error("image payload is empty")]
    EmptyPayload,

    /// The payload is not a recognized image format.
    #[error("unrecognized or corrupt image data")]
    Decode(#[source] image::ImageError),

    /// The decoded image has no pixels to resize.
    #[error("image has zero-sized dimensions {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// The normalized tensor does not match the model input geometry.
    #[error("normalized tensor has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        actual: Vec<usize>,
    },
}

impl ImageProcessError {
    /// Returns the stage this failure belongs to.
    pub fn stage(&self) -> ProcessingStage {
        match self {
            ImageProcessError::EmptyPayload | ImageProcessError::Decode(_) => {
                ProcessingStage::Decode
            }
            ImageProcessError::ZeroDimension { .. } => ProcessingStage::Resize,
            ImageProcessError::ShapeMismatch { .. } => ProcessingStage::Normalization,
        }
    }
}

/// Raised when the scorer does not answer within the configured budget.
#[derive(Error, Debug)]
#[error("scoring did not finish within {limit:?}")]
pub struct ScoringTimeout {
    /// The configured time budget.
    pub limit: Duration,
}

/// A message-only error used as the source of higher-level errors.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Stable, copyable discriminant of [`DxError`] for transport-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    InvalidClinicalData,
    ImageProcessing,
    Scoring,
    Internal,
}

/// Errors produced by the diagnostic pipeline.
#[derive(Error, Debug)]
pub enum DxError {
    /// The request contained no images.
    #[error("no images supplied")]
    EmptyInput,

    /// The clinical payload could not be read as a clinical record.
    #[error("invalid clinical data: {message}")]
    InvalidClinicalData {
        /// What was wrong with the payload.
        message: String,
    },

    /// One of the images could not be normalized; the whole request is aborted.
    #[error("image {index} ('{filename}') failed during {stage}")]
    ImageProcessing {
        /// Zero-based position of the image in the request.
        index: usize,
        /// Declared filename of the image.
        filename: String,
        /// Normalization stage that failed.
        stage: ProcessingStage,
        #[source]
        source: ImageProcessError,
    },

    /// The scorer failed or timed out.
    #[error("scoring with '{model_version}' failed: {context}")]
    Scoring {
        /// Version tag of the scorer that was invoked.
        model_version: String,
        /// Additional context about the failure.
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The model weights could not be loaded.
    #[error("failed to load model '{}': {reason}", path.display())]
    ModelLoad {
        path: PathBuf,
        reason: String,
        suggestion: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration problem.
    #[error("configuration: {message}")]
    ConfigError { message: String },

    /// The prediction log rejected an operation.
    #[error("prediction store: {message}")]
    Store { message: String },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl DxError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DxError::EmptyInput => ErrorKind::EmptyInput,
            DxError::InvalidClinicalData { .. } => ErrorKind::InvalidClinicalData,
            DxError::ImageProcessing { .. } => ErrorKind::ImageProcessing,
            DxError::Scoring { .. } => ErrorKind::Scoring,
            _ => ErrorKind::Internal,
        }
    }

    /// Returns true if this error was caused by the caller's request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EmptyInput | ErrorKind::InvalidClinicalData | ErrorKind::ImageProcessing
        )
    }
}

/// Convenient result alias for pipeline operations.
pub type DxResult<T> = Result<T, DxError>;
