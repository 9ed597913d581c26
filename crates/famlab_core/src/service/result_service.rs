//! Gap-analysis result use-cases.
//!
//! # Responsibility
//! - Derive fresh `ResultComparison` rows from a user's latest response.
//! - Merge a linked partner's real scores through the family-group relation.
//!
//! # Invariants
//! - Results are recomputed on every view; never persisted.
//! - Partner fields come only from an actual partner response; nothing is
//!   fabricated when no partner data exists.

use crate::model::profile::UserId;
use crate::model::response::Response;
use crate::model::result::ResultComparison;
use crate::repo::{ResponseStore, StoreResult, SurveyStore, UserStore};
use crate::score::{aggregate_results, merge_partner_results};
use crate::service::survey_service::SurveyService;
use log::{info, warn};

/// Use-case wrapper computing per-category gap results.
///
/// One backend value satisfies all three store contracts, so the service is
/// generic over a single store type.
pub struct ResultService<'store, S>
where
    S: SurveyStore + ResponseStore + UserStore,
{
    store: &'store S,
}

impl<'store, S> ResultService<'store, S>
where
    S: SurveyStore + ResponseStore + UserStore,
{
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    /// Latest response of one user for one survey, by effective completion
    /// time.
    pub fn latest_response(
        &self,
        user_id: UserId,
        survey_id: &str,
    ) -> StoreResult<Option<Response>> {
        // list_responses is already ordered latest-first.
        let responses = self.store.list_responses(user_id)?;
        Ok(responses
            .into_iter()
            .find(|response| response.survey_id == survey_id))
    }

    /// Computes per-category results for the user's latest attempt.
    ///
    /// Returns an empty list when the user has no response for the survey.
    /// When the user's family group contains a partner with a response for
    /// the same survey, the partner's aggregated scores are merged into the
    /// partner fields; otherwise they stay `None`.
    pub fn results_for(
        &self,
        user_id: UserId,
        survey_id: &str,
    ) -> StoreResult<Vec<ResultComparison>> {
        let Some(own_response) = self.latest_response(user_id, survey_id)? else {
            info!(
                "event=results module=service status=empty survey_id={survey_id} user_id={user_id}"
            );
            return Ok(Vec::new());
        };

        let survey = SurveyService::new(self.store).get(survey_id)?;
        let mut results = aggregate_results(&survey, &own_response.answers);

        match self.partner_response(user_id, survey_id) {
            Ok(Some(partner_response)) => {
                let partner_results = aggregate_results(&survey, &partner_response.answers);
                merge_partner_results(&mut results, &partner_results);
                info!(
                    "event=results module=service status=ok survey_id={survey_id} categories={} partner=yes",
                    results.len()
                );
            }
            Ok(None) => {
                info!(
                    "event=results module=service status=ok survey_id={survey_id} categories={} partner=no",
                    results.len()
                );
            }
            // Partner enrichment is best-effort; own results still stand.
            Err(err) => {
                warn!(
                    "event=results module=service status=partner_error survey_id={survey_id} error={err}"
                );
            }
        }

        Ok(results)
    }

    fn partner_response(
        &self,
        user_id: UserId,
        survey_id: &str,
    ) -> StoreResult<Option<Response>> {
        let Some(user) = self.store.get_user(user_id)? else {
            return Ok(None);
        };
        let Some(family_id) = user.family_id else {
            return Ok(None);
        };

        let members = self.store.family_members(family_id)?;
        for member in members {
            if member.id == user_id {
                continue;
            }
            if let Some(response) = self.latest_response(member.id, survey_id)? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }
}
