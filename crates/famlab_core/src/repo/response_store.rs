//! Response storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist submitted responses and list a user's attempt history.
//!
//! # Invariants
//! - Responses are append-only; submitted attempts are never updated.
//! - `list_responses` orders by effective completion time, latest first.

use crate::model::profile::UserId;
use crate::model::response::{Response, ResponseId};
use crate::repo::{SqliteStore, StoreError, StoreResult};
use rusqlite::{params, Row};
use uuid::Uuid;

const RESPONSE_SELECT_SQL: &str = "SELECT
    uuid,
    user_id,
    survey_id,
    answers,
    started_at,
    completed_at
FROM survey_responses";

/// Append/list access to submitted responses.
pub trait ResponseStore {
    /// Persists one response and returns its stable id.
    fn save_response(&self, response: &Response) -> StoreResult<ResponseId>;
    /// Returns the user's responses ordered by
    /// `COALESCE(completed_at, started_at) DESC`.
    fn list_responses(&self, user_id: UserId) -> StoreResult<Vec<Response>>;
}

impl ResponseStore for SqliteStore<'_> {
    fn save_response(&self, response: &Response) -> StoreResult<ResponseId> {
        response.validate()?;
        let answers_json = serde_json::to_string(&response.answers).map_err(|err| {
            StoreError::InvalidData(format!(
                "cannot serialize answers for response `{}`: {err}",
                response.id
            ))
        })?;

        self.conn().execute(
            "INSERT INTO survey_responses (uuid, user_id, survey_id, answers, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                response.id.to_string(),
                response.user_id.to_string(),
                response.survey_id.as_str(),
                answers_json,
                response.started_at,
                response.completed_at,
            ],
        )?;
        Ok(response.id)
    }

    fn list_responses(&self, user_id: UserId) -> StoreResult<Vec<Response>> {
        let mut stmt = self.conn().prepare(&format!(
            "{RESPONSE_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY COALESCE(completed_at, started_at) DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![user_id.to_string()])?;
        let mut responses = Vec::new();
        while let Some(row) = rows.next()? {
            responses.push(parse_response_row(row)?);
        }
        Ok(responses)
    }
}

fn parse_response_row(row: &Row<'_>) -> StoreResult<Response> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in survey_responses.uuid"
        ))
    })?;

    let user_text: String = row.get("user_id")?;
    let user_id = Uuid::parse_str(&user_text).map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid uuid value `{user_text}` in survey_responses.user_id"
        ))
    })?;

    let answers_json: String = row.get("answers")?;
    let answers = serde_json::from_str(&answers_json).map_err(|err| {
        StoreError::InvalidData(format!("invalid answers document for response `{id}`: {err}"))
    })?;

    let response = Response {
        id,
        user_id,
        survey_id: row.get("survey_id")?,
        answers,
        started_at: row.get("started_at")?,
        completed_at: row.get("completed_at")?,
    };
    response.validate()?;
    Ok(response)
}
