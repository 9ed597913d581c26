//! Per-category gap-analysis result record.
//!
//! Derived fresh from a response on every view; never persisted.

use serde::{Deserialize, Serialize};

/// Aggregated expectation/reality comparison for one category.
///
/// `gap == |expectation_score - reality_score|` always holds for the own
/// side; partner fields stay `None` until a linked partner has a completed
/// response for the same survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultComparison {
    pub category_id: String,
    pub category_name: String,
    pub expectation_score: f64,
    pub reality_score: f64,
    pub gap: f64,
    #[serde(default)]
    pub partner_expectation_score: Option<f64>,
    #[serde(default)]
    pub partner_reality_score: Option<f64>,
    #[serde(default)]
    pub partner_gap: Option<f64>,
}

impl ResultComparison {
    /// Result row for a category that was never answered.
    ///
    /// Deliberately zero instead of the neutral midpoint so "never answered"
    /// stays distinguishable from "answered neutrally".
    pub fn unanswered(category_id: impl Into<String>, category_name: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            category_name: category_name.into(),
            expectation_score: 0.0,
            reality_score: 0.0,
            gap: 0.0,
            partner_expectation_score: None,
            partner_reality_score: None,
            partner_gap: None,
        }
    }
}
