//! Structured clinical metadata accompanying an image batch.
//!
//! The record is parsed once per request and is immutable afterwards.
//! Absent or `null` fields are neutral: they never trigger a risk nudge.

use crate::core::errors::{DxError, DxResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Tumor sites treated as high risk by both the fallback scorer and the adjuster.
pub const HIGH_RISK_TUMOR_SITES: [&str; 2] = ["head-neck", "genitourinary"];

/// Symptoms treated as high risk by the fallback scorer.
pub const HIGH_RISK_SYMPTOMS: [&str; 3] = ["Swelling/Mass", "Pain", "Limited mobility"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ClinicalFields {
    age: Option<u32>,
    gender: Option<String>,
    #[serde(alias = "tumor_site")]
    tumor_site: Option<String>,
    #[serde(alias = "tumor_size")]
    tumor_size: Option<f64>,
    symptoms: Option<Vec<String>>,
    histology: Option<String>,
    stage: Option<String>,
    #[serde(alias = "prior_treatment")]
    prior_treatment: Option<String>,
    #[serde(alias = "family_history")]
    family_history: Option<bool>,
    notes: Option<String>,
}

/// Patient and tumor metadata for one prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalRecord {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub tumor_site: Option<String>,
    pub tumor_size: Option<f64>,
    pub symptoms: BTreeSet<String>,
    pub histology: Option<String>,
    pub stage: Option<String>,
    pub prior_treatment: Option<String>,
    pub family_history: Option<bool>,
    pub notes: Option<String>,
    raw: Value,
}

impl Default for ClinicalRecord {
    fn default() -> Self {
        Self {
            age: None,
            gender: None,
            tumor_site: None,
            tumor_size: None,
            symptoms: BTreeSet::new(),
            histology: None,
            stage: None,
            prior_treatment: None,
            family_history: None,
            notes: None,
            raw: Value::Object(Default::default()),
        }
    }
}

impl ClinicalRecord {
    /// Parses a record from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClinicalData` if the value is not an object, or if a
    /// recognized field has the wrong type (for example a negative `age`).
    pub fn from_value(value: &Value) -> DxResult<Self> {
        if !value.is_object() {
            return Err(DxError::invalid_clinical_data(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            )));
        }

        let fields: ClinicalFields = serde_json::from_value(value.clone())
            .map_err(|e| DxError::invalid_clinical_data(e.to_string()))?;

        Ok(Self {
            age: fields.age,
            gender: fields.gender,
            tumor_site: fields.tumor_site,
            tumor_size: fields.tumor_size,
            symptoms: fields.symptoms.unwrap_or_default().into_iter().collect(),
            histology: fields.histology,
            stage: fields.stage,
            prior_treatment: fields.prior_treatment,
            family_history: fields.family_history,
            notes: fields.notes,
            raw: value.clone(),
        })
    }

    /// Parses a record from a JSON string, as submitted alongside an upload.
    pub fn from_json_str(payload: &str) -> DxResult<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| DxError::invalid_clinical_data(format!("malformed JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// The payload exactly as submitted, for echoing back to the caller.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_male(&self) -> bool {
        self.gender.as_deref() == Some("male")
    }

    pub fn has_family_history(&self) -> bool {
        self.family_history.unwrap_or(false)
    }

    /// True when the age is known and within `low..=high`.
    pub fn age_within(&self, low: u32, high: u32) -> bool {
        self.age.is_some_and(|age| (low..=high).contains(&age))
    }

    /// True when the age is known and strictly below `limit`.
    pub fn age_below(&self, limit: u32) -> bool {
        self.age.is_some_and(|age| age < limit)
    }

    pub fn has_high_risk_site(&self) -> bool {
        self.tumor_site
            .as_deref()
            .is_some_and(|site| HIGH_RISK_TUMOR_SITES.contains(&site))
    }

    /// Number of distinct high-risk symptoms present.
    pub fn high_risk_symptom_count(&self) -> usize {
        HIGH_RISK_SYMPTOMS
            .iter()
            .filter(|s| self.symptoms.contains(**s))
            .count()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_camel_case_fields() {
        let record = ClinicalRecord::from_value(&json!({
            "age": 15,
            "gender": "male",
            "tumorSite": "head-neck",
            "familyHistory": true,
            "symptoms": ["Pain", "Fever"],
            "tumorSize": 3.5,
        }))
        .unwrap();

        assert_eq!(record.age, Some(15));
        assert!(record.is_male());
        assert!(record.has_high_risk_site());
        assert!(record.has_family_history());
        assert_eq!(record.tumor_size, Some(3.5));
        assert_eq!(record.high_risk_symptom_count(), 1);
    }

    #[test]
    fn test_accepts_snake_case_aliases() {
        let record = ClinicalRecord::from_value(&json!({
            "tumor_site": "genitourinary",
            "family_history": true,
        }))
        .unwrap();
        assert!(record.has_high_risk_site());
        assert!(record.has_family_history());
    }

    #[test]
    fn test_empty_object_is_neutral() {
        let record = ClinicalRecord::from_value(&json!({})).unwrap();
        assert_eq!(record.age, None);
        assert!(!record.is_male());
        assert!(!record.has_high_risk_site());
        assert!(!record.has_family_history());
        assert!(!record.age_below(20));
        assert!(!record.age_within(10, 25));
        assert_eq!(record.high_risk_symptom_count(), 0);
    }

    #[test]
    fn test_nulls_are_neutral() {
        let record = ClinicalRecord::from_value(&json!({
            "age": null,
            "gender": null,
            "familyHistory": null,
        }))
        .unwrap();
        assert_eq!(record, ClinicalRecord {
            raw: record.raw().clone(),
            ..ClinicalRecord::default()
        });
    }

    #[test]
    fn test_rejects_non_object_payloads() {
        for value in [json!([1, 2]), json!("age=15"), json!(null), json!(3)] {
            let err = ClinicalRecord::from_value(&value).unwrap_err();
            assert!(matches!(err, DxError::InvalidClinicalData { .. }));
        }
    }

    #[test]
    fn test_rejects_wrongly_typed_fields() {
        for value in [
            json!({"age": -3}),
            json!({"age": "fifteen"}),
            json!({"familyHistory": "yes"}),
            json!({"symptoms": "Pain"}),
        ] {
            assert!(ClinicalRecord::from_value(&value).is_err(), "{value}");
        }
    }

    #[test]
    fn test_from_json_str() {
        let record = ClinicalRecord::from_json_str(r#"{"age": 30, "gender": "female"}"#).unwrap();
        assert_eq!(record.age, Some(30));
        assert!(!record.is_male());

        let err = ClinicalRecord::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DxError::InvalidClinicalData { .. }));
    }

    #[test]
    fn test_unknown_fields_are_kept_in_raw() {
        let payload = json!({"age": 12, "ward": "B4"});
        let record = ClinicalRecord::from_value(&payload).unwrap();
        assert_eq!(record.raw(), &payload);
    }

    #[test]
    fn test_duplicate_symptoms_count_once() {
        let record = ClinicalRecord::from_value(&json!({
            "symptoms": ["Pain", "Pain", "Swelling/Mass", "Limited mobility"],
        }))
        .unwrap();
        assert_eq!(record.high_risk_symptom_count(), 3);
    }
}
