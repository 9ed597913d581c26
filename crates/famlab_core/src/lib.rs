//! Core domain logic for the famlab relationship-assessment survey.
//! This crate is the single source of truth for business invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod score;
pub mod service;
pub mod session;

pub use config::{AppConfig, ConfigError, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::profile::{Child, FamilyGroup, FamilyGroupId, User, UserId, UserProfile, UserRole};
pub use model::response::{
    Answer, AnswerValidationError, Response, ResponseId, RATING_MAX, RATING_MIN,
};
pub use model::result::ResultComparison;
pub use model::survey::{
    Category, Question, QuestionKind, RatingOption, Subcategory, Survey, SurveyValidationError,
};
pub use repo::{
    MemoryStore, ResponseStore, SqliteStore, StoreError, StoreResult, SurveyStore, UserStore,
};
pub use score::aggregate_results;
pub use service::result_service::ResultService;
pub use service::survey_service::SurveyService;
pub use session::{SessionError, StepOutcome, SurveySession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
