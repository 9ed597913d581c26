//! User and family-group storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist user records (profile document included) and family groups.
//! - Support the family linking that genuine partner comparison relies on.
//!
//! # Invariants
//! - `join_family_group` verifies both the user and the group exist.
//! - Profile documents are validated shapes, parsed strictly on read.

use crate::model::now_epoch_ms;
use crate::model::profile::{FamilyGroup, FamilyGroupId, User, UserId, UserProfile, UserRole};
use crate::repo::{SqliteStore, StoreError, StoreResult};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    uuid,
    email,
    display_name,
    family_id,
    role,
    profile
FROM users";

/// User persistence plus family-group linking.
pub trait UserStore {
    /// Inserts or replaces one user record.
    fn save_user(&self, user: &User) -> StoreResult<()>;
    /// Returns the user with the given id, or `None` when absent.
    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>>;
    /// Replaces an existing user's profile document.
    fn update_profile(&self, user_id: UserId, profile: &UserProfile) -> StoreResult<()>;
    /// Creates a family group and returns its stable id.
    fn create_family_group(&self, name: &str, created_by: UserId) -> StoreResult<FamilyGroupId>;
    /// Links one user to an existing family group.
    fn join_family_group(&self, user_id: UserId, group_id: FamilyGroupId) -> StoreResult<()>;
    /// Returns all members of one family group, ordered by id.
    fn family_members(&self, group_id: FamilyGroupId) -> StoreResult<Vec<User>>;
}

impl UserStore for SqliteStore<'_> {
    fn save_user(&self, user: &User) -> StoreResult<()> {
        let profile_json = serialize_profile(&user.profile, user.id)?;
        self.conn().execute(
            "INSERT INTO users (uuid, email, display_name, family_id, role, profile)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(uuid) DO UPDATE SET
                email = excluded.email,
                display_name = excluded.display_name,
                family_id = excluded.family_id,
                role = excluded.role,
                profile = excluded.profile,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                user.id.to_string(),
                user.email.as_str(),
                user.name.as_str(),
                user.family_id.map(|id| id.to_string()),
                role_to_db(user.role),
                profile_json,
            ],
        )?;
        Ok(())
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{USER_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn update_profile(&self, user_id: UserId, profile: &UserProfile) -> StoreResult<()> {
        let profile_json = serialize_profile(profile, user_id)?;
        let changed = self.conn().execute(
            "UPDATE users
             SET profile = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![profile_json, user_id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(())
    }

    fn create_family_group(&self, name: &str, created_by: UserId) -> StoreResult<FamilyGroupId> {
        let group = FamilyGroup {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_by,
            created_at: now_epoch_ms(),
        };
        self.conn().execute(
            "INSERT INTO family_groups (uuid, name, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                group.id.to_string(),
                group.name.as_str(),
                group.created_by.to_string(),
                group.created_at,
            ],
        )?;
        Ok(group.id)
    }

    fn join_family_group(&self, user_id: UserId, group_id: FamilyGroupId) -> StoreResult<()> {
        let group_exists: Option<i64> = self
            .conn()
            .query_row(
                "SELECT 1 FROM family_groups WHERE uuid = ?1;",
                params![group_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        if group_exists.is_none() {
            return Err(StoreError::FamilyGroupNotFound(group_id));
        }

        let changed = self.conn().execute(
            "UPDATE users
             SET family_id = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![group_id.to_string(), user_id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(())
    }

    fn family_members(&self, group_id: FamilyGroupId) -> StoreResult<Vec<User>> {
        let mut stmt = self.conn().prepare(&format!(
            "{USER_SELECT_SQL} WHERE family_id = ?1 ORDER BY uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![group_id.to_string()])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_user_row(row)?);
        }
        Ok(members)
    }
}

fn serialize_profile(profile: &UserProfile, user_id: UserId) -> StoreResult<String> {
    serde_json::to_string(profile).map_err(|err| {
        StoreError::InvalidData(format!(
            "cannot serialize profile for user `{user_id}`: {err}"
        ))
    })
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in users.uuid"))
    })?;

    let family_id = match row.get::<_, Option<String>>("family_id")? {
        Some(value) => Some(Uuid::parse_str(&value).map_err(|_| {
            StoreError::InvalidData(format!("invalid uuid value `{value}` in users.family_id"))
        })?),
        None => None,
    };

    let role_text: String = row.get("role")?;
    let role = parse_role(&role_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    let profile_json: String = row.get("profile")?;
    let profile = serde_json::from_str(&profile_json).map_err(|err| {
        StoreError::InvalidData(format!("invalid profile document for user `{id}`: {err}"))
    })?;

    Ok(User {
        id,
        email: row.get("email")?,
        name: row.get("display_name")?,
        family_id,
        role,
        profile,
    })
}

fn role_to_db(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::User => "user",
    }
}

fn parse_role(value: &str) -> Option<UserRole> {
    match value {
        "admin" => Some(UserRole::Admin),
        "user" => Some(UserRole::User),
        _ => None,
    }
}
