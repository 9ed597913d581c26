//! Survey lookup use-cases with demo-catalog fallback.
//!
//! # Responsibility
//! - Resolve surveys through the configured backend.
//! - Fall back to the built-in demonstration catalog on missing data or
//!   backend failure so the UI never blocks on an empty store.
//!
//! # Invariants
//! - A survey found in the backend always wins over the demo catalog.
//! - Backend failures are logged before the fallback is consulted.

use crate::demo::{demo_surveys, find_demo_survey};
use crate::model::survey::Survey;
use crate::repo::{StoreError, StoreResult, SurveyStore};
use log::{error, info};

/// Use-case wrapper over a survey store.
pub struct SurveyService<'store, S: SurveyStore> {
    store: &'store S,
}

impl<'store, S: SurveyStore> SurveyService<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    /// Returns active surveys, newest first.
    ///
    /// A backend failure yields the demonstration catalog instead of an
    /// error; the failure itself is logged.
    pub fn list_active(&self) -> Vec<Survey> {
        match self.store.list_active_surveys() {
            Ok(surveys) => surveys,
            Err(err) => {
                error!("event=survey_list module=service status=error error={err}");
                info!("event=survey_list module=service status=fallback source=demo");
                demo_surveys()
            }
        }
    }

    /// Resolves one survey by id.
    ///
    /// Falls back to the demonstration catalog when the backend does not
    /// know the id or fails; `SurveyNotFound` is returned only when the
    /// demo catalog misses too.
    pub fn get(&self, survey_id: &str) -> StoreResult<Survey> {
        match self.store.get_survey(survey_id) {
            Ok(Some(survey)) => Ok(survey),
            Ok(None) => {
                info!(
                    "event=survey_get module=service status=fallback survey_id={survey_id} source=demo"
                );
                find_demo_survey(survey_id)
                    .ok_or_else(|| StoreError::SurveyNotFound(survey_id.to_string()))
            }
            Err(err) => {
                error!(
                    "event=survey_get module=service status=error survey_id={survey_id} error={err}"
                );
                find_demo_survey(survey_id).ok_or(err)
            }
        }
    }
}
