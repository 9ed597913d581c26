//! Respondent account and profile model.
//!
//! # Responsibility
//! - Define the user record and the profile facts attached to it.
//! - Define the family-group relation used for partner comparison.
//!
//! # Invariants
//! - `UserProfile::has_children` is the sole fact driving question filtering.
//! - A user belongs to at most one family group at a time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one registered respondent.
pub type UserId = Uuid;

/// Stable identifier for one family group (one group per couple).
pub type FamilyGroupId = Uuid;

/// Coarse authorization role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
}

/// Child demographic record inside a parent profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub birth_date: String,
    pub gender: String,
}

/// Demographic profile attached to a user.
///
/// Only `has_children` participates in catalog filtering and scoring; the
/// remaining fields are rendering/reporting metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub has_children: bool,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub marriage_date: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub children: Vec<Child>,
}

impl UserProfile {
    /// Profile for a respondent with children.
    pub fn parent() -> Self {
        Self {
            has_children: true,
            ..Self::default()
        }
    }

    /// Profile for a respondent without children.
    pub fn childless() -> Self {
        Self::default()
    }
}

/// Registered respondent account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub family_id: Option<FamilyGroupId>,
    pub role: UserRole,
    pub profile: UserProfile,
}

impl User {
    /// Creates a plain (non-admin) user with a generated stable id.
    pub fn new(email: impl Into<String>, name: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            family_id: None,
            role: UserRole::User,
            profile,
        }
    }
}

/// Couple-level grouping record linking two respondents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyGroup {
    pub id: FamilyGroupId,
    pub name: String,
    pub created_by: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
