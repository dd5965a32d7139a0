//! Command-line front end for the diagnostic predictor.
//!
//! Usage:
//! ```text
//! cancerdx --model-path resnet50.onnx --clinical '{"age": 15, "tumorSite": "head-neck"}' slide1.png slide2.png
//! ```
//!
//! Without a usable model the heuristic fallback is used and reported in
//! `modelVersion`.

use cancerdx::core::config::{ConfigLoader, OrtExecutionProvider, OrtSessionConfig, PredictorConfig};
use cancerdx::core::init_tracing;
use cancerdx::domain::ImageAsset;
use cancerdx::predictors::{DiagnosticPredictor, load_scorer};
use cancerdx::store::{InMemoryPredictionStore, NewPredictionLog, PredictionStore};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments for the cancerdx tool
#[derive(Parser)]
#[command(name = "cancerdx")]
#[command(about = "Predicts a diagnostic label from histopathology images and clinical data")]
struct Args {
    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ONNX classifier; overrides the config file and CANCERDX_MODEL_PATH
    #[arg(short, long)]
    model_path: Option<PathBuf>,

    /// Clinical data as a JSON object
    #[arg(long, conflicts_with = "clinical_file")]
    clinical: Option<String>,

    /// File containing the clinical data JSON object
    #[arg(long)]
    clinical_file: Option<PathBuf>,

    /// Caller identity the prediction is logged under
    #[arg(short, long, default_value = "local")]
    user: String,

    /// Seed for the fallback scorer
    #[arg(long)]
    seed: Option<u64>,

    /// Resize interpolation (nearest, bilinear, bicubic, lanczos3)
    #[arg(long)]
    resize_filter: Option<String>,

    /// Device to run on (cpu, cuda, cuda:N)
    #[arg(short, long, default_value = "cpu")]
    device: String,

    /// Image files to process
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

/// Parses a device string into execution providers, CPU last.
fn parse_device(device: &str) -> Result<Vec<OrtExecutionProvider>, Box<dyn std::error::Error>> {
    let device = device.to_lowercase();
    if device == "cpu" {
        return Ok(vec![OrtExecutionProvider::CPU]);
    }

    let device_id = match device.as_str() {
        "cuda" => 0,
        other => match other.strip_prefix("cuda:") {
            Some(id) => id.parse()?,
            None => {
                return Err(format!(
                    "Unsupported device: {device}. Supported devices: cpu, cuda, cuda:N"
                )
                .into());
            }
        },
    };
    if !cfg!(feature = "cuda") {
        warn!("CUDA requested but cuda feature not enabled. Falling back to CPU.");
        return Ok(vec![OrtExecutionProvider::CPU]);
    }
    Ok(vec![
        OrtExecutionProvider::CUDA {
            device_id: Some(device_id),
        },
        OrtExecutionProvider::CPU,
    ])
}

fn build_config(args: &Args) -> Result<PredictorConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => PredictorConfig::default(),
    }
    .with_env_overrides();

    if let Some(path) = &args.model_path {
        config.model_path = Some(path.clone());
    }
    if let Some(seed) = args.seed {
        config.fallback.seed = Some(seed);
    }
    if let Some(filter) = &args.resize_filter {
        config.preprocessing.resize_filter = filter.parse()?;
    }
    let providers = parse_device(&args.device)?;
    let ort = config.ort_session.take().unwrap_or_else(OrtSessionConfig::new);
    config.ort_session = Some(OrtSessionConfig {
        execution_providers: Some(providers),
        ..ort
    });
    Ok(config)
}

fn read_clinical(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match (&args.clinical, &args.clinical_file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => "{}".to_string(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let config = build_config(&args)?;
    let loaded = load_scorer(&config);
    info!(
        "Scorer '{}' ready (loaded: {})",
        loaded.scorer.model_version(),
        loaded.availability.is_loaded()
    );

    let predictor = DiagnosticPredictor::builder()
        .config(config)
        .loaded_scorer(&loaded)
        .build()?;

    let images = args
        .images
        .iter()
        .map(ImageAsset::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    let clinical = read_clinical(&args)?;

    let result = predictor.predict_json(&images, &clinical)?;

    let store = InMemoryPredictionStore::new();
    let entry = store.append(&args.user, NewPredictionLog::from_result(&result, &images))?;
    info!("Logged prediction {} for '{}'", entry.id, entry.user_id);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
