//! Constants shared across the diagnostic pipeline.

/// Width of the scorer input, in pixels.
pub const INPUT_WIDTH: u32 = 224;

/// Height of the scorer input, in pixels.
pub const INPUT_HEIGHT: u32 = 224;

/// Number of color channels in the scorer input.
pub const INPUT_CHANNELS: usize = 3;

/// Confidence strictly above this value is labelled positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Confidences are rounded to this many decimal places before thresholding.
pub const CONFIDENCE_DECIMALS: i32 = 6;

/// Version tag reported when the trained model is installed.
pub const DEFAULT_MODEL_VERSION: &str = "ResNet50-v2.1";

/// Version tag reported when the heuristic fallback is installed.
pub const FALLBACK_MODEL_VERSION: &str = "heuristic-fallback-v1";

/// Default budget for a single scoring call, in milliseconds.
pub const DEFAULT_SCORE_TIMEOUT_MS: u64 = 30_000;

/// Default number of threads running time-limited scoring calls.
pub const DEFAULT_SCORE_WORKERS: usize = 2;

/// Scoring jobs allowed in flight (queued or running) per worker thread.
pub const PENDING_SCORES_PER_WORKER: usize = 4;

/// Per-channel means subtracted by the Caffe-style preprocessing (BGR order).
pub const CAFFE_BGR_MEAN: [f32; 3] = [103.939, 116.779, 123.68];

/// ImageNet channel means (RGB order, on a 0..1 scale).
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet channel standard deviations (RGB order, on a 0..1 scale).
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Environment variable that overrides the configured model path.
pub const MODEL_PATH_ENV: &str = "CANCERDX_MODEL_PATH";

/// Default range the fallback scorer samples its base probability from.
pub const DEFAULT_FALLBACK_RANGE: (f32, f32) = (0.3, 0.9);
