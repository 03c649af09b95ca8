//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Jeevanamrit S3 bucket.

use uuid::Uuid;

/// Profiles are keyed by the owning user, not by the row id.
pub fn profile(user_id: Uuid) -> String {
    format!("profiles/{user_id}.json")
}
