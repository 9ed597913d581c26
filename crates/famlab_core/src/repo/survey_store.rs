//! Survey storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide read access to authored survey documents plus a seed/upsert
//!   write path for administrative tooling.
//! - Keep SQL and JSON-document details inside the persistence boundary.
//!
//! # Invariants
//! - `list_active_surveys` returns only active surveys, newest first.
//! - Category trees are validated on write and again on read.

use crate::model::survey::Survey;
use crate::repo::{bool_to_int, int_to_bool, SqliteStore, StoreError, StoreResult};
use rusqlite::{params, Row};

const SURVEY_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    categories,
    is_active,
    created_at,
    updated_at
FROM surveys";

/// Read (plus seed/upsert) access to authored surveys.
pub trait SurveyStore {
    /// Inserts or replaces one survey document.
    fn put_survey(&self, survey: &Survey) -> StoreResult<()>;
    /// Returns the survey with the given id, or `None` when absent.
    fn get_survey(&self, survey_id: &str) -> StoreResult<Option<Survey>>;
    /// Returns active surveys ordered by `created_at DESC, id ASC`.
    fn list_active_surveys(&self) -> StoreResult<Vec<Survey>>;
}

impl SurveyStore for SqliteStore<'_> {
    fn put_survey(&self, survey: &Survey) -> StoreResult<()> {
        survey.validate()?;
        let categories_json = serde_json::to_string(&survey.categories).map_err(|err| {
            StoreError::InvalidData(format!(
                "cannot serialize categories for survey `{}`: {err}",
                survey.id
            ))
        })?;

        self.conn().execute(
            "INSERT INTO surveys (id, title, description, categories, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                categories = excluded.categories,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at;",
            params![
                survey.id.as_str(),
                survey.title.as_str(),
                survey.description.as_str(),
                categories_json,
                bool_to_int(survey.is_active),
                survey.created_at,
                survey.updated_at,
            ],
        )?;
        Ok(())
    }

    fn get_survey(&self, survey_id: &str) -> StoreResult<Option<Survey>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SURVEY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![survey_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_survey_row(row)?));
        }
        Ok(None)
    }

    fn list_active_surveys(&self) -> StoreResult<Vec<Survey>> {
        let mut stmt = self.conn().prepare(&format!(
            "{SURVEY_SELECT_SQL} WHERE is_active = 1 ORDER BY created_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut surveys = Vec::new();
        while let Some(row) = rows.next()? {
            surveys.push(parse_survey_row(row)?);
        }
        Ok(surveys)
    }
}

fn parse_survey_row(row: &Row<'_>) -> StoreResult<Survey> {
    let id: String = row.get("id")?;
    let categories_json: String = row.get("categories")?;
    let categories = serde_json::from_str(&categories_json).map_err(|err| {
        StoreError::InvalidData(format!(
            "invalid categories document for survey `{id}`: {err}"
        ))
    })?;

    let survey = Survey {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        categories,
        is_active: int_to_bool(row.get("is_active")?, "surveys.is_active")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    survey.validate()?;
    Ok(survey)
}
