//! Question catalog traversal and profile filtering.
//!
//! # Responsibility
//! - Flatten the category tree into ordered question sequences.
//! - Apply the parent/childless applicability rule for rendering and gating.
//!
//! # Invariants
//! - Output order is declaration order; no re-sorting.
//! - Pure functions of catalog + profile; no hidden state, no errors.

use crate::model::profile::UserProfile;
use crate::model::survey::{Category, Question, Survey};

/// Returns every question declared under the category, in source order.
///
/// This is the full declared set used by scoring, independent of profile.
pub fn category_questions(category: &Category) -> Vec<&Question> {
    category
        .subcategories
        .iter()
        .flat_map(|subcategory| subcategory.questions.iter())
        .collect()
}

/// Returns the category's questions applicable to the given profile,
/// in source order.
pub fn applicable_questions<'survey>(
    category: &'survey Category,
    profile: &UserProfile,
) -> Vec<&'survey Question> {
    category
        .subcategories
        .iter()
        .flat_map(|subcategory| subcategory.questions.iter())
        .filter(|question| question.is_applicable(profile))
        .collect()
}

/// Looks up a category by id within one survey.
pub fn find_category<'survey>(survey: &'survey Survey, category_id: &str) -> Option<&'survey Category> {
    survey
        .categories
        .iter()
        .find(|category| category.id == category_id)
}

/// Total applicable question count across the whole survey for one profile.
pub fn applicable_question_count(survey: &Survey, profile: &UserProfile) -> usize {
    survey
        .categories
        .iter()
        .map(|category| applicable_questions(category, profile).len())
        .sum()
}
