//! Answer and response records.
//!
//! # Responsibility
//! - Define the per-question answer and the submitted response envelope.
//! - Enforce the 1..=5 rating range at the validation boundary.
//!
//! # Invariants
//! - A response is immutable once submitted.
//! - Multiple responses per (user, survey) pair are permitted; re-attempts
//!   are distinguished by completion timestamp.

use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one submitted response.
pub type ResponseId = Uuid;

/// Lowest permitted rating value.
pub const RATING_MIN: i32 = 1;
/// Highest permitted rating value.
pub const RATING_MAX: i32 = 5;

/// One rating given for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    /// Integer rating in `[RATING_MIN, RATING_MAX]`.
    pub value: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: i32) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            comment: None,
        }
    }

    /// Validates entry-level answer invariants.
    pub fn validate(&self) -> Result<(), AnswerValidationError> {
        if self.question_id.trim().is_empty() {
            return Err(AnswerValidationError::EmptyQuestionId);
        }
        if self.value < RATING_MIN || self.value > RATING_MAX {
            return Err(AnswerValidationError::ValueOutOfRange {
                question_id: self.question_id.clone(),
                value: self.value,
            });
        }
        Ok(())
    }
}

/// Entry-level answer violations, rejected before any computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValidationError {
    EmptyQuestionId,
    ValueOutOfRange { question_id: String, value: i32 },
}

impl Display for AnswerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestionId => write!(f, "answer question id cannot be empty"),
            Self::ValueOutOfRange { question_id, value } => write!(
                f,
                "answer for `{question_id}` has value {value} outside {RATING_MIN}..={RATING_MAX}"
            ),
        }
    }
}

impl Error for AnswerValidationError {}

/// One complete (or partial) submission of answers to a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub user_id: UserId,
    pub survey_id: String,
    pub answers: Vec<Answer>,
    /// Unix epoch milliseconds.
    pub started_at: i64,
    /// Unix epoch milliseconds; `None` while an attempt is still open.
    #[serde(default)]
    pub completed_at: Option<i64>,
}

impl Response {
    /// Builds a completed response with a generated stable id.
    pub fn completed(
        user_id: UserId,
        survey_id: impl Into<String>,
        answers: Vec<Answer>,
        started_at: i64,
        completed_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            survey_id: survey_id.into(),
            answers,
            started_at,
            completed_at: Some(completed_at),
        }
    }

    /// Timestamp used for latest-attempt ordering.
    pub fn effective_completed_at(&self) -> i64 {
        self.completed_at.unwrap_or(self.started_at)
    }

    /// Validates every contained answer.
    pub fn validate(&self) -> Result<(), AnswerValidationError> {
        for answer in &self.answers {
            answer.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Answer, AnswerValidationError, Response, RATING_MAX, RATING_MIN};
    use uuid::Uuid;

    #[test]
    fn answer_accepts_full_rating_range() {
        for value in RATING_MIN..=RATING_MAX {
            assert!(Answer::new("q1_exp", value).validate().is_ok());
        }
    }

    #[test]
    fn answer_rejects_out_of_range_values() {
        for value in [0, 6, -1, 100] {
            let err = Answer::new("q1_exp", value).validate().unwrap_err();
            assert!(matches!(
                err,
                AnswerValidationError::ValueOutOfRange { .. }
            ));
        }
    }

    #[test]
    fn answer_rejects_empty_question_id() {
        let err = Answer::new("  ", 3).validate().unwrap_err();
        assert_eq!(err, AnswerValidationError::EmptyQuestionId);
    }

    #[test]
    fn response_validation_covers_all_answers() {
        let response = Response::completed(
            Uuid::new_v4(),
            "1",
            vec![Answer::new("q1_exp", 5), Answer::new("q1_real", 9)],
            1,
            2,
        );
        assert!(response.validate().is_err());
    }

    #[test]
    fn effective_completed_at_falls_back_to_started_at() {
        let mut response = Response::completed(Uuid::new_v4(), "1", Vec::new(), 10, 20);
        assert_eq!(response.effective_completed_at(), 20);
        response.completed_at = None;
        assert_eq!(response.effective_completed_at(), 10);
    }
}
