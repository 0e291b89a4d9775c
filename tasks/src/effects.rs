//! One-shot notifications for the task screen.

use serde::{Deserialize, Serialize};

/// A transient, exactly-once notification.
///
/// Side effects are never part of [`TaskScreenState`](crate::state::TaskScreenState);
/// they go out over the controller's single-consumer channel and are dropped
/// if nobody is listening at emission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskScreenSideEffect {
    /// Show a short transient text message
    ShowMessage {
        /// Text to display
        message: String,
    },
}
