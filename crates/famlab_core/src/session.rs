//! Survey navigation state machine.
//!
//! # Responsibility
//! - Track the current page and the in-memory answer set for one session.
//! - Gate forward navigation on the minimum-answered-ratio threshold.
//! - Submit the accumulated answers on completion of the final page.
//!
//! # Invariants
//! - `current_page` stays in `[1, total_pages]`.
//! - One page per category, in category declaration order.
//! - Submission clears answers and resets to page 1 regardless of
//!   persistence outcome; failures are logged, never retried.

use crate::catalog::applicable_questions;
use crate::model::now_epoch_ms;
use crate::model::profile::{UserId, UserProfile};
use crate::model::response::{Answer, AnswerValidationError, Response, ResponseId};
use crate::model::survey::{Category, Survey, SurveyValidationError};
use crate::repo::ResponseStore;
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum answered/applicable ratio required to leave a non-final page.
const MIN_ANSWERED_RATIO: f64 = 0.5;

/// Session construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Survey has no categories, so there is no page to show.
    EmptySurvey(String),
    /// Survey failed catalog validation.
    InvalidSurvey(SurveyValidationError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySurvey(survey_id) => {
                write!(f, "survey `{survey_id}` has no categories")
            }
            Self::InvalidSurvey(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptySurvey(_) => None,
            Self::InvalidSurvey(err) => Some(err),
        }
    }
}

impl From<SurveyValidationError> for SessionError {
    fn from(value: SurveyValidationError) -> Self {
        Self::InvalidSurvey(value)
    }
}

/// Outcome of one `go_next` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Gating rule not satisfied; page unchanged.
    Blocked,
    /// Advanced to the given page.
    Moved { page: u32 },
    /// Final page completed; answers were submitted and the session reset.
    /// `response_id` is `None` when persistence failed (already logged);
    /// local state is reset either way.
    Submitted { response_id: Option<ResponseId> },
}

/// Explicit, injectable per-session survey state.
///
/// Owned by the composing application shell; one logical session per user
/// per device, mutated only by that session.
#[derive(Debug)]
pub struct SurveySession {
    survey: Survey,
    user_id: UserId,
    profile: UserProfile,
    current_page: u32,
    answers: BTreeMap<String, Answer>,
    started_at: i64,
}

impl SurveySession {
    /// Starts a session on page 1 with an empty answer set.
    pub fn new(survey: Survey, user_id: UserId, profile: UserProfile) -> Result<Self, SessionError> {
        survey.validate()?;
        if survey.categories.is_empty() {
            return Err(SessionError::EmptySurvey(survey.id));
        }
        Ok(Self {
            survey,
            user_id,
            profile,
            current_page: 1,
            answers: BTreeMap::new(),
            started_at: now_epoch_ms(),
        })
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Current 1-based page number.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.survey.total_pages()
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages()
    }

    /// Category backing the current page.
    pub fn current_category(&self) -> &Category {
        // new() guarantees at least one category and current_page stays
        // within [1, total_pages].
        &self.survey.categories[self.current_page as usize - 1]
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Recorded value for one question, if any.
    pub fn answer_value(&self, question_id: &str) -> Option<i32> {
        self.answers.get(question_id).map(|answer| answer.value)
    }

    /// Upserts an answer for the current session; last write wins.
    ///
    /// Rejects out-of-range ratings at entry so invalid values never reach
    /// aggregation. Does not change the current page.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<String>,
        value: i32,
        comment: Option<String>,
    ) -> Result<(), AnswerValidationError> {
        let mut answer = Answer::new(question_id, value);
        answer.comment = comment;
        answer.validate()?;
        self.answers.insert(answer.question_id.clone(), answer);
        Ok(())
    }

    /// Gating rule for `go_next`.
    ///
    /// Non-final page: at least half of the page's applicable questions are
    /// answered (a page with zero applicable questions trivially passes).
    /// Final page: at least one answer exists anywhere in the session.
    pub fn can_proceed(&self) -> bool {
        if self.is_last_page() {
            return !self.answers.is_empty();
        }

        let questions = applicable_questions(self.current_category(), &self.profile);
        if questions.is_empty() {
            return true;
        }
        let answered = questions
            .iter()
            .filter(|question| self.answers.contains_key(question.id.as_str()))
            .count();
        answered as f64 / questions.len() as f64 >= MIN_ANSWERED_RATIO
    }

    /// Moves back one page. Returns `false` on page 1; no completeness
    /// gating applies on the way back.
    pub fn go_previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            return true;
        }
        false
    }

    /// Advances one page, or submits on the final page.
    ///
    /// Submission builds a completed response from the accumulated answers,
    /// hands it to the store, then clears the answer set and resets to
    /// page 1. A persistence failure is logged and reported through
    /// `StepOutcome::Submitted { response_id: None }` without reverting the
    /// local reset.
    pub fn go_next<S: ResponseStore>(&mut self, store: &S) -> StepOutcome {
        if !self.can_proceed() {
            return StepOutcome::Blocked;
        }

        if !self.is_last_page() {
            self.current_page += 1;
            return StepOutcome::Moved {
                page: self.current_page,
            };
        }

        let response = Response::completed(
            self.user_id,
            self.survey.id.clone(),
            self.answers.values().cloned().collect(),
            self.started_at,
            now_epoch_ms(),
        );
        let answer_count = response.answers.len();

        let response_id = match store.save_response(&response) {
            Ok(response_id) => {
                info!(
                    "event=response_submit module=session status=ok survey_id={} response_id={response_id} answers={answer_count}",
                    self.survey.id
                );
                Some(response_id)
            }
            Err(err) => {
                error!(
                    "event=response_submit module=session status=error survey_id={} answers={answer_count} error={err}",
                    self.survey.id
                );
                None
            }
        };

        self.answers.clear();
        self.current_page = 1;
        self.started_at = now_epoch_ms();
        StepOutcome::Submitted { response_id }
    }
}
