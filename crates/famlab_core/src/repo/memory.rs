//! In-memory backend implementing every storage contract.
//!
//! # Responsibility
//! - Back tests and ephemeral sessions without touching disk.
//! - Mirror the SQLite backend's validation and ordering semantics exactly.
//!
//! # Invariants
//! - Listing order matches the SQLite implementation for every contract.
//! - Records are validated on write like the SQLite paths.

use crate::model::now_epoch_ms;
use crate::model::profile::{FamilyGroup, FamilyGroupId, User, UserId, UserProfile};
use crate::model::response::{Response, ResponseId};
use crate::model::survey::Survey;
use crate::repo::{ResponseStore, StoreError, StoreResult, SurveyStore, UserStore};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Ephemeral backend holding all records in process memory.
#[derive(Default)]
pub struct MemoryStore {
    surveys: Mutex<BTreeMap<String, Survey>>,
    responses: Mutex<Vec<Response>>,
    users: Mutex<BTreeMap<UserId, User>>,
    family_groups: Mutex<BTreeMap<FamilyGroupId, FamilyGroup>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// The session model is single-threaded; poisoning can only come from a
// panicking test, so recover the inner state instead of propagating.
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SurveyStore for MemoryStore {
    fn put_survey(&self, survey: &Survey) -> StoreResult<()> {
        survey.validate()?;
        guard(&self.surveys).insert(survey.id.clone(), survey.clone());
        Ok(())
    }

    fn get_survey(&self, survey_id: &str) -> StoreResult<Option<Survey>> {
        Ok(guard(&self.surveys).get(survey_id).cloned())
    }

    fn list_active_surveys(&self) -> StoreResult<Vec<Survey>> {
        let mut surveys: Vec<Survey> = guard(&self.surveys)
            .values()
            .filter(|survey| survey.is_active)
            .cloned()
            .collect();
        surveys.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(surveys)
    }
}

impl ResponseStore for MemoryStore {
    fn save_response(&self, response: &Response) -> StoreResult<ResponseId> {
        response.validate()?;
        guard(&self.responses).push(response.clone());
        Ok(response.id)
    }

    fn list_responses(&self, user_id: UserId) -> StoreResult<Vec<Response>> {
        let mut responses: Vec<Response> = guard(&self.responses)
            .iter()
            .filter(|response| response.user_id == user_id)
            .cloned()
            .collect();
        responses.sort_by(|a, b| {
            b.effective_completed_at()
                .cmp(&a.effective_completed_at())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(responses)
    }
}

impl UserStore for MemoryStore {
    fn save_user(&self, user: &User) -> StoreResult<()> {
        guard(&self.users).insert(user.id, user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        Ok(guard(&self.users).get(&user_id).cloned())
    }

    fn update_profile(&self, user_id: UserId, profile: &UserProfile) -> StoreResult<()> {
        let mut users = guard(&self.users);
        let user = users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        user.profile = profile.clone();
        Ok(())
    }

    fn create_family_group(&self, name: &str, created_by: UserId) -> StoreResult<FamilyGroupId> {
        let group = FamilyGroup {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_by,
            created_at: now_epoch_ms(),
        };
        let group_id = group.id;
        guard(&self.family_groups).insert(group_id, group);
        Ok(group_id)
    }

    fn join_family_group(&self, user_id: UserId, group_id: FamilyGroupId) -> StoreResult<()> {
        if !guard(&self.family_groups).contains_key(&group_id) {
            return Err(StoreError::FamilyGroupNotFound(group_id));
        }
        let mut users = guard(&self.users);
        let user = users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        user.family_id = Some(group_id);
        Ok(())
    }

    fn family_members(&self, group_id: FamilyGroupId) -> StoreResult<Vec<User>> {
        Ok(guard(&self.users)
            .values()
            .filter(|user| user.family_id == Some(group_id))
            .cloned()
            .collect())
    }
}
