//! Events fed into the task screen reducer.

use crate::error::TaskResult;
use crate::model::Task;

/// All inputs the task screen processes.
///
/// The first group comes from the rendering layer; the second group is fed
/// back by the effect futures that carried out the remote work. Each
/// mutating intent is its own two-phase unit: issued (the intent) and
/// resolved (the matching result event).
#[derive(Clone, Debug)]
pub enum TaskScreenEvent {
    // ========== UI intents ==========
    /// Load the full task list
    FetchTasks,

    /// Create a new task from the given title and body
    AddTask {
        /// Title of the new task
        title: String,
        /// Body of the new task
        body: String,
    },

    /// Persist the working buffers to the currently selected task
    UpdateTask,

    /// Delete the task with the given identifier
    DeleteTask {
        /// Identifier of the task to delete
        task_id: String,
    },

    /// Replace the shared title buffer
    TitleChanged(String),

    /// Replace the shared body buffer
    BodyChanged(String),

    /// Show or hide the add-task dialog
    AddDialogChanged(bool),

    /// Show or hide the update-task dialog
    UpdateDialogChanged(bool),

    /// Select the task the update dialog edits
    TaskSelected(Task),

    // ========== Repository results ==========
    /// A full fetch resolved
    TasksFetched(TaskResult<Vec<Task>>),

    /// An insert resolved
    TaskAdded(TaskResult<()>),

    /// An update resolved
    TaskUpdated(TaskResult<()>),

    /// A delete resolved
    TaskDeleted(TaskResult<()>),
}
