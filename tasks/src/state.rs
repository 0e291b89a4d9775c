//! State snapshot for the task screen.

use crate::model::Task;
use serde::{Deserialize, Serialize};

/// The single snapshot the screen renders from.
///
/// The snapshot is owned by the screen's controller and replaced wholesale on
/// every transition; nothing outside the reducer mutates individual fields.
///
/// The two dialog flags are independent: nothing enforces that only one is
/// set at a time, matching the screen this models.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskScreenState {
    /// A remote operation is in flight
    pub is_loading: bool,
    /// Tasks in store-returned order; never sorted client-side
    pub tasks: Vec<Task>,
    /// Part of the UI contract; transitions currently never write it
    pub error_message: Option<String>,
    /// The add-task dialog is visible
    pub show_add_dialog: bool,
    /// The update-task dialog is visible
    pub show_update_dialog: bool,
    /// The task the update dialog edits
    pub task_to_update: Option<Task>,
    /// Working title buffer, shared by both dialogs
    pub title_input: String,
    /// Working body buffer, shared by both dialogs
    pub body_input: String,
}
