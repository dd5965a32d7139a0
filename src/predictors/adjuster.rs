//! Clinical risk adjustment.
//!
//! A fixed table of additive nudges applied to the scorer's aggregated
//! probability. Deltas are summed in table order, the total is rounded to
//! [`CONFIDENCE_DECIMALS`] places and clamped once at the end.

use crate::core::constants::CONFIDENCE_DECIMALS;
use crate::domain::ClinicalRecord;

/// One named entry of the adjustment table.
#[derive(Clone, Copy)]
pub struct AdjustmentRule {
    pub name: &'static str,
    pub delta: f64,
    applies: fn(&ClinicalRecord) -> bool,
}

impl std::fmt::Debug for AdjustmentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjustmentRule")
            .field("name", &self.name)
            .field("delta", &self.delta)
            .finish()
    }
}

impl AdjustmentRule {
    pub const fn new(name: &'static str, delta: f64, applies: fn(&ClinicalRecord) -> bool) -> Self {
        Self {
            name,
            delta,
            applies,
        }
    }

    pub fn applies_to(&self, clinical: &ClinicalRecord) -> bool {
        (self.applies)(clinical)
    }
}

/// The standard rule table, in application order.
pub const STANDARD_RULES: [AdjustmentRule; 4] = [
    AdjustmentRule::new("age_under_20", 0.05, |c| c.age_below(20)),
    AdjustmentRule::new("male", 0.02, ClinicalRecord::is_male),
    AdjustmentRule::new(
        "high_risk_tumor_site",
        0.08,
        ClinicalRecord::has_high_risk_site,
    ),
    AdjustmentRule::new("family_history", 0.05, ClinicalRecord::has_family_history),
];

/// Result of an adjustment, with the rules that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub confidence: f64,
    pub applied_rules: Vec<&'static str>,
}

/// Applies the clinical rule table to a base probability.
///
/// Pure and deterministic: the same inputs always give the same output.
#[derive(Debug, Clone)]
pub struct ClinicalRiskAdjuster {
    rules: Vec<AdjustmentRule>,
}

impl Default for ClinicalRiskAdjuster {
    fn default() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }
}

impl ClinicalRiskAdjuster {
    pub fn new(rules: Vec<AdjustmentRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    /// Returns the adjusted probability, clamped to [0, 1].
    pub fn adjust(&self, base: f64, clinical: &ClinicalRecord) -> f64 {
        self.explain(base, clinical).confidence
    }

    /// Adjusts `base` and reports which rules contributed.
    pub fn explain(&self, base: f64, clinical: &ClinicalRecord) -> Adjustment {
        let mut total = base;
        let mut applied_rules = Vec::new();
        for rule in self.rules.iter().filter(|r| r.applies_to(clinical)) {
            total += rule.delta;
            applied_rules.push(rule.name);
        }

        Adjustment {
            confidence: round_confidence(total).clamp(0.0, 1.0),
            applied_rules,
        }
    }
}

/// Rounds a confidence to [`CONFIDENCE_DECIMALS`] places.
///
/// Binary sums of decimal deltas drift by a few ulps (`0.3 + 0.05 + 0.02 +
/// 0.08 + 0.05` is not exactly `0.5`); rounding keeps the threshold
/// comparison on the decimal value.
pub fn round_confidence(value: f64) -> f64 {
    let factor = 10f64.powi(CONFIDENCE_DECIMALS);
    (value * factor).round() / factor
}
