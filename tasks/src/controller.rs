//! The screen-session controller.

use crate::effects::TaskScreenSideEffect;
use crate::events::TaskScreenEvent;
use crate::reducer::{TaskScreenEnvironment, TaskScreenReducer};
use crate::repository::TaskRepository;
use crate::state::TaskScreenState;
use std::sync::Arc;
use std::time::Duration;
use taskdeck_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use tokio::sync::{broadcast, watch};

/// The concrete store type the task screen runs on.
pub type TaskScreenStore = Store<
    TaskScreenState,
    TaskScreenEvent,
    TaskScreenSideEffect,
    TaskScreenEnvironment,
    TaskScreenReducer,
>;

/// Owns the state loop for one task screen session.
///
/// The controller holds the single [`TaskScreenState`] snapshot, applies one
/// event at a time, and exposes exactly the surface the rendering layer
/// needs: the dispatch entry point, the snapshot stream, and the one-shot
/// notification stream.
///
/// # Concurrency
///
/// Mutating events spawn independent units of work; nothing serializes one
/// in-flight operation against the next. Two rapid deletes race freely
/// against the remote store, their follow-up fetches may interleave, and
/// the visible task list reflects whichever fetch resolves last. This is
/// the screen's accepted behavior, kept observable on purpose rather than
/// hardened behind a work queue.
pub struct TaskScreenController {
    store: TaskScreenStore,
}

impl TaskScreenController {
    /// Create a controller for one screen session.
    ///
    /// Construction dispatches [`TaskScreenEvent::FetchTasks`] exactly once,
    /// as a spawned unit of work. Must be called from within a tokio
    /// runtime.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self::with_config(repository, StoreConfig::default())
    }

    /// Create a controller with a custom store configuration
    #[must_use]
    pub fn with_config(repository: Arc<dyn TaskRepository>, config: StoreConfig) -> Self {
        let store = Store::with_config(
            TaskScreenState::default(),
            TaskScreenReducer::new(),
            TaskScreenEnvironment::new(repository),
            config,
        );

        let controller = Self { store };
        controller.spawn_initial_fetch();
        controller
    }

    fn spawn_initial_fetch(&self) {
        let store = self.store.clone();
        tokio::spawn(async move {
            let _ = store.send(TaskScreenEvent::FetchTasks).await;
        });
    }

    /// Dispatch one event.
    ///
    /// Synchronous events (text and dialog edits) are fully applied before
    /// this returns; mutating events return with the remote work still in
    /// flight. The returned [`EffectHandle`] waits for that work and
    /// everything it cascades into (the follow-up fetch included).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the session is shutting
    /// down.
    pub async fn dispatch(&self, event: TaskScreenEvent) -> Result<EffectHandle, StoreError> {
        self.store.send(event).await
    }

    /// Current state snapshot
    pub async fn state(&self) -> TaskScreenState {
        self.store.state(Clone::clone).await
    }

    /// Subscribe to state snapshots
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<TaskScreenState> {
        self.store.subscribe_state()
    }

    /// Subscribe to one-shot notifications
    ///
    /// Notifications are delivered to the consumers attached at emission
    /// time and never replayed; an unobserved notification is dropped.
    #[must_use]
    pub fn subscribe_side_effects(&self) -> broadcast::Receiver<TaskScreenSideEffect> {
        self.store.subscribe_side_effects()
    }

    /// Gracefully shut the session down, waiting for in-flight work.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}
