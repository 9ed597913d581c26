//! Storage contracts and interchangeable backend implementations.
//!
//! # Responsibility
//! - Define the narrow persistence/query contract the core expects
//!   (`SurveyStore`, `ResponseStore`, `UserStore`).
//! - Provide two interchangeable implementations of every contract:
//!   `SqliteStore` (local persistent) and `MemoryStore` (ephemeral).
//!
//! # Invariants
//! - Write paths validate records before persistence; read paths reject
//!   invalid persisted documents instead of masking them.
//! - Listing order is part of every contract and identical across backends.

pub mod memory;
pub mod response_store;
pub mod survey_store;
pub mod user_store;

use crate::db::DbError;
use crate::model::profile::{FamilyGroupId, UserId};
use crate::model::response::AnswerValidationError;
use crate::model::survey::SurveyValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::MemoryStore;
pub use response_store::ResponseStore;
pub use survey_store::SurveyStore;
pub use user_store::UserStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic error for persistence and query operations across all backends.
#[derive(Debug)]
pub enum StoreError {
    Survey(SurveyValidationError),
    Answer(AnswerValidationError),
    Db(DbError),
    SurveyNotFound(String),
    UserNotFound(UserId),
    FamilyGroupNotFound(FamilyGroupId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Survey(err) => write!(f, "{err}"),
            Self::Answer(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::SurveyNotFound(survey_id) => write!(f, "survey not found: {survey_id}"),
            Self::UserNotFound(user_id) => write!(f, "user not found: {user_id}"),
            Self::FamilyGroupNotFound(group_id) => {
                write!(f, "family group not found: {group_id}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Survey(err) => Some(err),
            Self::Answer(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurveyValidationError> for StoreError {
    fn from(value: SurveyValidationError) -> Self {
        Self::Survey(value)
    }
}

impl From<AnswerValidationError> for StoreError {
    fn from(value: AnswerValidationError) -> Self {
        Self::Answer(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// SQLite-backed implementation of all storage contracts.
///
/// The local persistent backend (the "demo mode" shadow of the remote
/// document store). Borrows a bootstrapped connection from `db::open_db`.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
