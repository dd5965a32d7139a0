//! One-time scorer selection at process startup.
//!
//! The trained model is loaded at most once. If that fails for any reason
//! the heuristic scorer is installed instead and the failure is logged; no
//! request ever sees the load error.

use crate::core::config::PredictorConfig;
use crate::core::traits::{ImageScorer, RandomSource};
use crate::models::{HeuristicScorer, OnnxScorer};
use crate::utils::random::random_source;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Whether the trained model could be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorerAvailability {
    Loaded { model_path: PathBuf },
    Unavailable { reason: String },
}

impl ScorerAvailability {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ScorerAvailability::Loaded { .. })
    }
}

/// The scorer selected at startup, shared by all requests.
#[derive(Debug, Clone)]
pub struct LoadedScorer {
    pub scorer: Arc<dyn ImageScorer>,
    pub availability: ScorerAvailability,
}

/// Loads the configured model, falling back to the heuristic scorer.
///
/// The fallback draws from a seeded source when `config.fallback.seed` is set.
pub fn load_scorer(config: &PredictorConfig) -> LoadedScorer {
    load_scorer_with_random(config, random_source(config.fallback.seed))
}

/// Like [`load_scorer`], with the fallback's random source supplied by the caller.
pub fn load_scorer_with_random(
    config: &PredictorConfig,
    random: Box<dyn RandomSource>,
) -> LoadedScorer {
    let attempt = match &config.model_path {
        None => Err("no model path configured".to_string()),
        Some(path) => OnnxScorer::load(config, path)
            .map(|scorer| (scorer, path.clone()))
            .map_err(|e| e.to_string()),
    };

    match attempt {
        Ok((scorer, model_path)) => {
            info!(
                "Loaded model '{}' from {}",
                scorer.model_version(),
                model_path.display()
            );
            LoadedScorer {
                scorer: Arc::new(scorer),
                availability: ScorerAvailability::Loaded { model_path },
            }
        }
        Err(reason) => {
            error!(
                "Model unavailable ({}); using fallback scorer '{}'",
                reason, config.fallback_model_version
            );
            let fallback = HeuristicScorer::new(
                random,
                config.fallback.base_range,
                config.fallback_model_version.clone(),
            );
            LoadedScorer {
                scorer: Arc::new(fallback),
                availability: ScorerAvailability::Unavailable { reason },
            }
        }
    }
}

/// Process-wide scorer slot, initialized on first access.
///
/// Concurrent first callers block until the single initialization has
/// finished, so no request scores before the model is loaded or confirmed
/// unavailable.
#[derive(Debug)]
pub struct ScorerCell {
    config: PredictorConfig,
    cell: OnceCell<LoadedScorer>,
}

impl ScorerCell {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Returns the scorer, loading it on the first call.
    pub fn get(&self) -> &LoadedScorer {
        self.cell.get_or_init(|| load_scorer(&self.config))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}
