//! # Taskdeck Tasks
//!
//! The task screen feature crate: a single-screen task manager core backed
//! by a remote document store.
//!
//! Two components compose the core:
//!
//! - [`repository::RemoteTaskRepository`] - timeout-guarded CRUD against a
//!   flat remote collection, folding every failure mode into one uniform
//!   [`error::TaskResult`]
//! - [`controller::TaskScreenController`] - the state loop: UI events are
//!   reduced into a new [`state::TaskScreenState`] snapshot plus effect
//!   futures; results feed back in; notifications go out exactly once over
//!   a one-shot channel
//!
//! The rendering layer's entire contract is the controller surface: the
//! nine dispatchable UI events, the snapshot stream, and the side-effect
//! stream.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskdeck_core::environment::SystemClock;
//! use taskdeck_tasks::{
//!     MemoryDocumentStore, RemoteTaskRepository, TaskScreenController, TaskScreenEvent,
//! };
//!
//! let repository = RemoteTaskRepository::new(
//!     Arc::new(MemoryDocumentStore::new()),
//!     Arc::new(SystemClock),
//! );
//! let controller = TaskScreenController::new(Arc::new(repository));
//!
//! controller
//!     .dispatch(TaskScreenEvent::AddTask {
//!         title: "Buy milk".to_string(),
//!         body: "2%".to_string(),
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod controller;
pub mod documents;
pub mod effects;
pub mod error;
pub mod events;
pub mod model;
pub mod reducer;
pub mod repository;
pub mod state;

pub use config::RepositoryConfig;
pub use controller::{TaskScreenController, TaskScreenStore};
pub use documents::{Document, DocumentStore, DocumentStoreError, MemoryDocumentStore};
pub use effects::TaskScreenSideEffect;
pub use error::{CONNECTIVITY_MESSAGE, TaskError, TaskResult};
pub use events::TaskScreenEvent;
pub use model::Task;
pub use reducer::{TaskScreenEnvironment, TaskScreenReducer};
pub use repository::{RemoteTaskRepository, TaskRepository};
pub use state::TaskScreenState;
