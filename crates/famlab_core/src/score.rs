//! Response aggregation into per-category gap scores.
//!
//! # Responsibility
//! - Fold a flat answer list into one `ResultComparison` per category.
//! - Merge a partner's aggregated results into the own-side rows.
//!
//! # Invariants
//! - Output length equals the survey's category count, in survey order.
//! - Pure and total: unknown question ids are ignored, never fatal.
//! - `gap = |expectation - reality|` on every emitted row.

use crate::catalog::category_questions;
use crate::model::response::Answer;
use crate::model::result::ResultComparison;
use crate::model::survey::{Category, QuestionKind, Survey};
use std::collections::BTreeMap;

/// Score substituted when one side of a partially-answered category has no
/// answers. An entirely unanswered category reports zero instead.
pub const NEUTRAL_MIDPOINT: f64 = 3.0;

/// Aggregates a response's answers into one result row per category.
///
/// Scoring uses the full declared question set per category (no profile
/// filtering); the answer list already reflects what the respondent was
/// shown.
pub fn aggregate_results(survey: &Survey, answers: &[Answer]) -> Vec<ResultComparison> {
    survey
        .categories
        .iter()
        .map(|category| aggregate_category(category, answers))
        .collect()
}

fn aggregate_category(category: &Category, answers: &[Answer]) -> ResultComparison {
    let kinds: BTreeMap<&str, QuestionKind> = category_questions(category)
        .into_iter()
        .map(|question| (question.id.as_str(), question.kind))
        .collect();

    let mut expectation_values = Vec::new();
    let mut reality_values = Vec::new();
    for answer in answers {
        match kinds.get(answer.question_id.as_str()) {
            Some(QuestionKind::Expectation) => expectation_values.push(answer.value),
            Some(QuestionKind::Reality) => reality_values.push(answer.value),
            None => {}
        }
    }

    if expectation_values.is_empty() && reality_values.is_empty() {
        return ResultComparison::unanswered(category.id.clone(), category.name.clone());
    }

    let expectation_score = mean_or_neutral(&expectation_values);
    let reality_score = mean_or_neutral(&reality_values);
    ResultComparison {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        expectation_score,
        reality_score,
        gap: (expectation_score - reality_score).abs(),
        partner_expectation_score: None,
        partner_reality_score: None,
        partner_gap: None,
    }
}

fn mean_or_neutral(values: &[i32]) -> f64 {
    if values.is_empty() {
        return NEUTRAL_MIDPOINT;
    }
    let sum: f64 = values.iter().copied().map(f64::from).sum();
    sum / values.len() as f64
}

/// Copies a partner's own-side scores into the partner fields of `own`,
/// matched by category id. Rows without a partner counterpart are left
/// untouched.
pub fn merge_partner_results(own: &mut [ResultComparison], partner: &[ResultComparison]) {
    for row in own.iter_mut() {
        if let Some(mirror) = partner
            .iter()
            .find(|candidate| candidate.category_id == row.category_id)
        {
            row.partner_expectation_score = Some(mirror.expectation_score);
            row.partner_reality_score = Some(mirror.reality_score);
            row.partner_gap = Some(mirror.gap);
        }
    }
}
