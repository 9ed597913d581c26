//! Domain model for the relationship-assessment survey.
//!
//! # Responsibility
//! - Define the catalog tree (survey, category, subcategory, question).
//! - Define respondent-side records (profile, answer, response, result).
//!
//! # Invariants
//! - Every question belongs to exactly one subcategory and one category.
//! - Answer values are integers in `[RATING_MIN, RATING_MAX]`.
//! - Timestamps are Unix epoch milliseconds.

pub mod profile;
pub mod response;
pub mod result;
pub mod survey;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time as Unix epoch milliseconds.
///
/// Clamps to zero for clocks set before the epoch instead of panicking.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
