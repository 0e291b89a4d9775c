//! Domain model for the task screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One to-do item as the screen displays it.
///
/// `task_id` and `created_at` are assigned on creation and never mutated by
/// the client afterwards; `title` and `body` change through updates. No
/// in-memory copy is authoritative - list views are re-fetched after every
/// mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier; empty before the task exists remotely
    pub task_id: String,
    /// Task title, may be empty
    pub title: String,
    /// Task body, may be empty
    pub body: String,
    /// Creation timestamp in the fixed display format; empty when the stored
    /// value is absent or malformed
    pub created_at: String,
}

/// Display format for creation timestamps.
const DISPLAY_FORMAT: &str = "%d %b %Y, %H:%M";

/// Render a timestamp the way task documents store it (RFC 3339).
#[must_use]
pub fn stored_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339()
}

/// Reformat a stored timestamp into the fixed display format.
///
/// Absent or unparseable input becomes the empty string, so a malformed
/// document never fails a fetch.
#[must_use]
pub fn display_timestamp(stored: &str) -> String {
    DateTime::parse_from_rfc3339(stored)
        .map(|parsed| parsed.with_timezone(&Utc).format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
