//! Prediction log.
//!
//! The persistence collaborator's contract: an append-only log keyed by
//! caller identity, read back newest first with `limit`/`offset`
//! pagination. [`InMemoryPredictionStore`] is the in-process
//! implementation used by the command-line tool and the tests.

use crate::core::errors::{DxError, DxResult};
use crate::domain::{ImageAsset, PredictionLabel, PredictionResult, joined_filenames};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// A completed prediction, ready to be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPredictionLog {
    /// Image filenames joined with ", ".
    pub filename: String,
    pub prediction: PredictionLabel,
    pub confidence: f64,
    pub clinical_data: Value,
    pub processing_time_seconds: f64,
    pub model_version: String,
    pub image_count: usize,
    pub notes: Option<String>,
}

impl NewPredictionLog {
    /// Builds a log record from a successful prediction.
    pub fn from_result(result: &PredictionResult, images: &[ImageAsset]) -> Self {
        Self {
            filename: joined_filenames(images),
            prediction: result.label,
            confidence: result.confidence,
            clinical_data: result.clinical_data.clone(),
            processing_time_seconds: result.processing_time_seconds,
            model_version: result.model_version.clone(),
            image_count: result.image_count,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn tumor_site(&self) -> Option<&str> {
        self.clinical_data
            .get("tumorSite")
            .or_else(|| self.clinical_data.get("tumor_site"))
            .and_then(Value::as_str)
    }
}

/// A stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionLogEntry {
    pub id: u64,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub record: NewPredictionLog,
}

/// Aggregates over one caller's log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_predictions: usize,
    pub positive_predictions: usize,
    pub negative_predictions: usize,
    pub average_confidence: f64,
    pub last_prediction_date: Option<DateTime<Utc>>,
    pub most_common_tumor_site: Option<String>,
}

/// Storage for prediction logs.
pub trait PredictionStore: Send + Sync {
    /// Appends a record for `user_id` and returns the stored entry.
    fn append(&self, user_id: &str, record: NewPredictionLog) -> DxResult<PredictionLogEntry>;

    /// Returns up to `limit` entries for `user_id`, newest first, skipping `offset`.
    fn history(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> DxResult<Vec<PredictionLogEntry>>;

    /// Summarizes the log of `user_id`.
    fn statistics(&self, user_id: &str) -> DxResult<UserStatistics>;
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    entries: Vec<PredictionLogEntry>,
}

/// Process-local prediction log.
#[derive(Debug, Default)]
pub struct InMemoryPredictionStore {
    state: RwLock<StoreState>,
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn user_entries(&self, user_id: &str) -> Vec<PredictionLogEntry> {
        let mut entries: Vec<_> = self
            .read()
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries
    }
}

fn validate_record(user_id: &str, record: &NewPredictionLog) -> DxResult<()> {
    if user_id.trim().is_empty() {
        return Err(DxError::store_error("user id must not be empty"));
    }
    if !(0.0..=1.0).contains(&record.confidence) {
        return Err(DxError::store_error(format!(
            "confidence {} is outside [0, 1]",
            record.confidence
        )));
    }
    if record.image_count == 0 {
        return Err(DxError::store_error("a prediction covers at least one image"));
    }
    Ok(())
}

impl PredictionStore for InMemoryPredictionStore {
    fn append(&self, user_id: &str, record: NewPredictionLog) -> DxResult<PredictionLogEntry> {
        validate_record(user_id, &record)?;

        let mut state = self.write();
        state.next_id += 1;
        let entry = PredictionLogEntry {
            id: state.next_id,
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            record,
        };
        state.entries.push(entry.clone());
        tracing::debug!("Logged prediction {} for '{}'", entry.id, user_id);
        Ok(entry)
    }

    fn history(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> DxResult<Vec<PredictionLogEntry>> {
        Ok(self
            .user_entries(user_id)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    fn statistics(&self, user_id: &str) -> DxResult<UserStatistics> {
        let entries = self.user_entries(user_id);
        if entries.is_empty() {
            return Ok(UserStatistics::default());
        }

        let positive = entries
            .iter()
            .filter(|e| e.record.prediction == PredictionLabel::Positive)
            .count();
        let confidence_sum: f64 = entries.iter().map(|e| e.record.confidence).sum();

        let mut sites: BTreeMap<&str, usize> = BTreeMap::new();
        for site in entries.iter().filter_map(|e| e.record.tumor_site()) {
            *sites.entry(site).or_default() += 1;
        }
        let most_common_tumor_site = sites
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
            .map(|(site, _)| site.to_string());

        Ok(UserStatistics {
            total_predictions: entries.len(),
            positive_predictions: positive,
            negative_predictions: entries.len() - positive,
            average_confidence: confidence_sum / entries.len() as f64,
            last_prediction_date: entries.first().map(|e| e.timestamp),
            most_common_tumor_site,
        })
    }
}
