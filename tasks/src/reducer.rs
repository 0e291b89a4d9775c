//! Reducer logic for the task screen.
//!
//! Every UI intent either edits the snapshot synchronously or flips
//! `is_loading` on and issues one repository call as an effect future; the
//! matching result event folds the outcome back into the snapshot and emits
//! at most one notification. No transition throws: the repository already
//! turned every failure into a [`TaskResult`](crate::error::TaskResult).

use crate::effects::TaskScreenSideEffect;
use crate::error::TaskError;
use crate::events::TaskScreenEvent;
use crate::repository::TaskRepository;
use crate::state::TaskScreenState;
use std::sync::Arc;
use taskdeck_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Success notification texts.
const TASK_ADDED: &str = "Task added successfully";
const TASK_UPDATED: &str = "Task updated successfully";
const TASK_DELETED: &str = "Task deleted successfully";

/// Fallback notification texts for errors that carry no message of their own.
const FETCH_FAILED: &str = "An error occurred while fetching all tasks";
const ADD_FAILED: &str = "An error occurred while adding task";
const UPDATE_FAILED: &str = "An error occurred while updating task";
const DELETE_FAILED: &str = "An error occurred while deleting task";

/// Effect list the task screen reducer returns.
type Effects = SmallVec<[Effect<TaskScreenEvent, TaskScreenSideEffect>; 4]>;

/// Environment dependencies for the task screen reducer
#[derive(Clone)]
pub struct TaskScreenEnvironment {
    /// Repository the screen's remote operations go through
    pub repository: Arc<dyn TaskRepository>,
}

impl TaskScreenEnvironment {
    /// Creates a new `TaskScreenEnvironment`
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }
}

/// Reducer for the task screen
#[derive(Clone, Debug, Default)]
pub struct TaskScreenReducer;

impl TaskScreenReducer {
    /// Creates a new `TaskScreenReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Message for a failed operation: the error's own text, or the given
    /// fallback when it carries none
    fn failure_message(error: &TaskError, fallback: &str) -> String {
        let message = error.to_string();
        if message.is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    fn notify(message: impl Into<String>) -> Effect<TaskScreenEvent, TaskScreenSideEffect> {
        Effect::Notify(TaskScreenSideEffect::ShowMessage {
            message: message.into(),
        })
    }

    /// Follow-up fetch after a successful mutation: a separate unit of work,
    /// logically concurrent with the success notification
    fn refetch() -> Effect<TaskScreenEvent, TaskScreenSideEffect> {
        Effect::future(async { Some(TaskScreenEvent::FetchTasks) })
    }
}

impl Reducer for TaskScreenReducer {
    type State = TaskScreenState;
    type Event = TaskScreenEvent;
    type SideEffect = TaskScreenSideEffect;
    type Environment = TaskScreenEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        event: Self::Event,
        env: &Self::Environment,
    ) -> Effects {
        match event {
            // ========== UI intents ==========
            TaskScreenEvent::FetchTasks => {
                state.is_loading = true;
                let repository = Arc::clone(&env.repository);
                smallvec![Effect::future(async move {
                    Some(TaskScreenEvent::TasksFetched(
                        repository.get_all_tasks().await,
                    ))
                })]
            },

            TaskScreenEvent::AddTask { title, body } => {
                state.is_loading = true;
                let repository = Arc::clone(&env.repository);
                smallvec![Effect::future(async move {
                    Some(TaskScreenEvent::TaskAdded(
                        repository.add_task(title, body).await,
                    ))
                })]
            },

            TaskScreenEvent::UpdateTask => {
                state.is_loading = true;
                // Reads the working buffers and the selection from state; an
                // absent selection targets the empty identifier, whose
                // validity is the store's concern.
                let task_id = state
                    .task_to_update
                    .as_ref()
                    .map(|task| task.task_id.clone())
                    .unwrap_or_default();
                let title = state.title_input.clone();
                let body = state.body_input.clone();
                let repository = Arc::clone(&env.repository);
                smallvec![Effect::future(async move {
                    Some(TaskScreenEvent::TaskUpdated(
                        repository.update_task(task_id, title, body).await,
                    ))
                })]
            },

            TaskScreenEvent::DeleteTask { task_id } => {
                state.is_loading = true;
                let repository = Arc::clone(&env.repository);
                smallvec![Effect::future(async move {
                    Some(TaskScreenEvent::TaskDeleted(
                        repository.delete_task(task_id).await,
                    ))
                })]
            },

            TaskScreenEvent::TitleChanged(title) => {
                state.title_input = title;
                smallvec![]
            },

            TaskScreenEvent::BodyChanged(body) => {
                state.body_input = body;
                smallvec![]
            },

            TaskScreenEvent::AddDialogChanged(show) => {
                state.show_add_dialog = show;
                smallvec![]
            },

            TaskScreenEvent::UpdateDialogChanged(show) => {
                state.show_update_dialog = show;
                smallvec![]
            },

            TaskScreenEvent::TaskSelected(task) => {
                state.task_to_update = Some(task);
                smallvec![]
            },

            // ========== Repository results ==========
            TaskScreenEvent::TasksFetched(Ok(tasks)) => {
                state.is_loading = false;
                state.tasks = tasks;
                smallvec![]
            },

            TaskScreenEvent::TasksFetched(Err(error)) => {
                state.is_loading = false;
                smallvec![Self::notify(Self::failure_message(&error, FETCH_FAILED))]
            },

            TaskScreenEvent::TaskAdded(Ok(())) => {
                state.is_loading = false;
                state.title_input.clear();
                state.body_input.clear();
                state.show_add_dialog = false;
                smallvec![Self::notify(TASK_ADDED), Self::refetch()]
            },

            TaskScreenEvent::TaskAdded(Err(error)) => {
                state.is_loading = false;
                smallvec![Self::notify(Self::failure_message(&error, ADD_FAILED))]
            },

            TaskScreenEvent::TaskUpdated(Ok(())) => {
                state.is_loading = false;
                state.title_input.clear();
                state.body_input.clear();
                state.show_update_dialog = false;
                smallvec![Self::notify(TASK_UPDATED), Self::refetch()]
            },

            TaskScreenEvent::TaskUpdated(Err(error)) => {
                state.is_loading = false;
                smallvec![Self::notify(Self::failure_message(&error, UPDATE_FAILED))]
            },

            TaskScreenEvent::TaskDeleted(Ok(())) => {
                state.is_loading = false;
                smallvec![Self::notify(TASK_DELETED), Self::refetch()]
            },

            TaskScreenEvent::TaskDeleted(Err(error)) => {
                state.is_loading = false;
                smallvec![Self::notify(Self::failure_message(&error, DELETE_FAILED))]
            },
        }
    }
}
