//! Survey catalog model.
//!
//! # Responsibility
//! - Define the read-only `Survey -> Category -> Subcategory -> Question` tree.
//! - Provide the question applicability rule for parent/childless profiles.
//!
//! # Invariants
//! - Question/category/subcategory ids are stable authored strings.
//! - A question's `category_id`/`subcategory_id` must match its containing
//!   nodes; `Survey::validate` rejects orphans.
//! - Category order equals survey page order; no re-sorting anywhere.

use crate::model::profile::UserProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whether a question asks for a desired state or a perceived current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Stated desire/importance rating.
    Expectation,
    /// Perceived current experience rating.
    Reality,
}

/// One rating question inside a subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub category_id: String,
    pub subcategory_id: String,
    pub show_for_childless: bool,
    pub show_for_parents: bool,
}

impl Question {
    /// Applicability rule: parents see `show_for_parents` questions,
    /// childless respondents see `show_for_childless` questions.
    pub fn is_applicable(&self, profile: &UserProfile) -> bool {
        if profile.has_children {
            self.show_for_parents
        } else {
            self.show_for_childless
        }
    }
}

/// Ordered group of questions sharing one theme inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Subcategory {
    /// Derived visibility: a subcategory is shown iff any contained question
    /// is applicable to the profile.
    pub fn is_visible_for(&self, profile: &UserProfile) -> bool {
        self.questions
            .iter()
            .any(|question| question.is_applicable(profile))
    }
}

/// One survey page worth of subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subcategories: Vec<Subcategory>,
}

/// Complete survey definition. Authored by an administrative process and
/// read-only to this crate apart from seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub is_active: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Survey {
    /// Number of navigation pages; one page per category.
    pub fn total_pages(&self) -> u32 {
        self.categories.len() as u32
    }

    /// Returns the category backing the given 1-based page number.
    pub fn category_for_page(&self, page: u32) -> Option<&Category> {
        if page == 0 {
            return None;
        }
        self.categories.get(page as usize - 1)
    }

    /// Validates declaration-level catalog invariants.
    ///
    /// # Invariants checked
    /// - Survey id and title are non-empty.
    /// - Question ids are unique across the whole survey.
    /// - Every question's owning ids match its containing nodes.
    pub fn validate(&self) -> Result<(), SurveyValidationError> {
        if self.id.trim().is_empty() {
            return Err(SurveyValidationError::EmptySurveyId);
        }
        if self.title.trim().is_empty() {
            return Err(SurveyValidationError::EmptyTitle(self.id.clone()));
        }

        let mut seen = BTreeSet::<&str>::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(SurveyValidationError::EmptyCategoryId(self.id.clone()));
            }
            for subcategory in &category.subcategories {
                for question in &subcategory.questions {
                    if question.id.trim().is_empty() {
                        return Err(SurveyValidationError::EmptyQuestionId {
                            subcategory_id: subcategory.id.clone(),
                        });
                    }
                    if question.category_id != category.id
                        || question.subcategory_id != subcategory.id
                    {
                        return Err(SurveyValidationError::OrphanQuestion {
                            question_id: question.id.clone(),
                        });
                    }
                    if !seen.insert(question.id.as_str()) {
                        return Err(SurveyValidationError::DuplicateQuestionId {
                            question_id: question.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Declaration-level catalog violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyValidationError {
    EmptySurveyId,
    EmptyTitle(String),
    EmptyCategoryId(String),
    EmptyQuestionId { subcategory_id: String },
    OrphanQuestion { question_id: String },
    DuplicateQuestionId { question_id: String },
}

impl Display for SurveyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySurveyId => write!(f, "survey id cannot be empty"),
            Self::EmptyTitle(survey_id) => {
                write!(f, "survey `{survey_id}` has an empty title")
            }
            Self::EmptyCategoryId(survey_id) => {
                write!(f, "survey `{survey_id}` contains a category with empty id")
            }
            Self::EmptyQuestionId { subcategory_id } => write!(
                f,
                "subcategory `{subcategory_id}` contains a question with empty id"
            ),
            Self::OrphanQuestion { question_id } => write!(
                f,
                "question `{question_id}` owning ids do not match its containing nodes"
            ),
            Self::DuplicateQuestionId { question_id } => {
                write!(f, "duplicate question id `{question_id}` in survey")
            }
        }
    }
}

impl Error for SurveyValidationError {}

/// One row of the five-step rating scale shown next to every question.
///
/// Rendering metadata only; scoring uses the raw `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOption {
    pub value: i32,
    pub expectation_label: String,
    pub reality_label: String,
}
