//! Timeout-guarded CRUD against the remote task collection.
//!
//! Every operation races the store call against a fixed deadline and folds
//! every failure mode - timeout, store error, malformed data - into the one
//! [`TaskResult`] shape, so the reducer treats all four calls identically.
//! The deadline guards against a store client that hangs indefinitely on
//! lost connectivity, which would otherwise pin the screen's loading state
//! forever.

use crate::config::RepositoryConfig;
use crate::documents::{self, Document, DocumentStore, DocumentStoreError};
use crate::error::{TaskError, TaskResult};
use crate::model::{self, Task};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use taskdeck_core::environment::Clock;

/// The four remote operations the task screen needs.
///
/// # Dyn Compatibility
///
/// Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
/// `Arc<dyn TaskRepository>` inside effect futures.
pub trait TaskRepository: Send + Sync {
    /// Insert a new task built from `title`, `body`, and the current time.
    ///
    /// The store-assigned identifier is intentionally not returned; callers
    /// re-fetch the list to see it.
    fn add_task(
        &self,
        title: String,
        body: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>>;

    /// Fetch every task, in store order.
    ///
    /// An empty collection is an empty list, not a failure. Missing fields
    /// default to the empty string, so malformed documents never fail a
    /// fetch.
    fn get_all_tasks(&self) -> Pin<Box<dyn Future<Output = TaskResult<Vec<Task>>> + Send + '_>>;

    /// Delete the task with the given identifier.
    ///
    /// The store treats a missing identifier as a no-op delete, so unknown
    /// identifiers report success.
    fn delete_task(
        &self,
        task_id: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>>;

    /// Update exactly the `title` and `body` fields of the target task;
    /// identifier and creation timestamp stay untouched.
    fn update_task(
        &self,
        task_id: String,
        title: String,
        body: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>>;
}

/// Production repository over a remote document store.
#[derive(Clone)]
pub struct RemoteTaskRepository {
    documents: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    config: RepositoryConfig,
}

impl RemoteTaskRepository {
    /// Create a repository with the default configuration (collection
    /// `tasks`, 10 second deadline)
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(documents, clock, RepositoryConfig::default())
    }

    /// Create a repository with a custom configuration
    #[must_use]
    pub fn with_config(
        documents: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            documents,
            clock,
            config,
        }
    }

    /// Race a store call against the configured deadline and fold the
    /// outcome into a [`TaskResult`].
    ///
    /// On deadline the in-flight call is dropped: only the client stops
    /// waiting, nothing is cancelled remotely.
    async fn guarded<T>(
        &self,
        op: &'static str,
        remote_call: impl Future<Output = Result<T, DocumentStoreError>>,
    ) -> TaskResult<T> {
        metrics::counter!("repository.calls.total", "op" => op).increment(1);

        match tokio::time::timeout(self.config.call_timeout, remote_call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                tracing::warn!(op, error = %error, "Remote call failed");
                metrics::counter!("repository.failures.total", "op" => op).increment(1);
                Err(TaskError::Remote(error.to_string()))
            },
            Err(_) => {
                tracing::warn!(op, "Remote call exceeded deadline");
                metrics::counter!("repository.timeouts.total", "op" => op).increment(1);
                Err(TaskError::Timeout)
            },
        }
    }

    fn task_from_document(document: &Document) -> Task {
        Task {
            task_id: document.doc_id.clone(),
            title: document.field_or_empty(documents::FIELD_TITLE),
            body: document.field_or_empty(documents::FIELD_BODY),
            created_at: model::display_timestamp(
                document.field(documents::FIELD_CREATED_AT).unwrap_or_default(),
            ),
        }
    }
}

impl TaskRepository for RemoteTaskRepository {
    fn add_task(
        &self,
        title: String,
        body: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>> {
        Box::pin(async move {
            let fields = HashMap::from([
                (documents::FIELD_TITLE.to_string(), title),
                (documents::FIELD_BODY.to_string(), body),
                (
                    documents::FIELD_CREATED_AT.to_string(),
                    model::stored_timestamp(self.clock.now()),
                ),
            ]);

            let insert = self.documents.insert(self.config.collection.clone(), fields);
            // The new identifier is dropped here on purpose; list views
            // re-fetch after every mutation.
            self.guarded("add_task", insert).await.map(|_doc_id| ())
        })
    }

    fn get_all_tasks(&self) -> Pin<Box<dyn Future<Output = TaskResult<Vec<Task>>> + Send + '_>> {
        Box::pin(async move {
            let fetch = self.documents.fetch_all(self.config.collection.clone());
            let documents = self.guarded("get_all_tasks", fetch).await?;
            Ok(documents.iter().map(Self::task_from_document).collect())
        })
    }

    fn delete_task(
        &self,
        task_id: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>> {
        Box::pin(async move {
            let delete = self.documents.delete(self.config.collection.clone(), task_id);
            self.guarded("delete_task", delete).await
        })
    }

    fn update_task(
        &self,
        task_id: String,
        title: String,
        body: String,
    ) -> Pin<Box<dyn Future<Output = TaskResult<()>> + Send + '_>> {
        Box::pin(async move {
            let fields = HashMap::from([
                (documents::FIELD_TITLE.to_string(), title),
                (documents::FIELD_BODY.to_string(), body),
            ]);

            let update = self
                .documents
                .update(self.config.collection.clone(), task_id, fields);
            self.guarded("update_task", update).await
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::documents::MemoryDocumentStore;
    use crate::error::CONNECTIVITY_MESSAGE;
    use std::time::Duration;
    use taskdeck_testing::test_clock;

    fn memory_repository() -> (RemoteTaskRepository, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repository = RemoteTaskRepository::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::new(test_clock()),
        );
        (repository, store)
    }

    /// A store whose calls never resolve, standing in for a client hanging
    /// on lost connectivity.
    struct StallingStore;

    impl DocumentStore for StallingStore {
        fn insert(
            &self,
            _collection: String,
            _fields: HashMap<String, String>,
        ) -> Pin<Box<dyn Future<Output = Result<String, DocumentStoreError>> + Send + '_>> {
            Box::pin(std::future::pending())
        }

        fn fetch_all(
            &self,
            _collection: String,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Document>, DocumentStoreError>> + Send + '_>>
        {
            Box::pin(std::future::pending())
        }

        fn update(
            &self,
            _collection: String,
            _doc_id: String,
            _fields: HashMap<String, String>,
        ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>> {
            Box::pin(std::future::pending())
        }

        fn delete(
            &self,
            _collection: String,
            _doc_id: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>> {
            Box::pin(std::future::pending())
        }
    }

    fn stalling_repository() -> RemoteTaskRepository {
        RemoteTaskRepository::new(Arc::new(StallingStore), Arc::new(test_clock()))
    }

    #[tokio::test]
    async fn add_then_fetch_round_trips() {
        let (repository, _) = memory_repository();

        repository
            .add_task("Buy milk".to_string(), "2%".to_string())
            .await
            .unwrap();

        let tasks = repository.get_all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].task_id.is_empty());
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].body, "2%");
        assert_eq!(tasks[0].created_at, "01 Jan 2025, 00:00");
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let (repository, store) = memory_repository();

        // A document missing body and createdAt entirely
        store
            .insert(
                "tasks".to_string(),
                HashMap::from([("title".to_string(), "half a task".to_string())]),
            )
            .await
            .unwrap();

        let tasks = repository.get_all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "half a task");
        assert_eq!(tasks[0].body, "");
        assert_eq!(tasks[0].created_at, "");
    }

    #[tokio::test]
    async fn empty_collection_is_success() {
        let (repository, _) = memory_repository();
        let tasks = repository.get_all_tasks().await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn update_changes_title_and_body_only() {
        let (repository, _) = memory_repository();

        repository
            .add_task("old title".to_string(), "old body".to_string())
            .await
            .unwrap();
        let task_id = repository.get_all_tasks().await.unwrap()[0].task_id.clone();

        repository
            .update_task(task_id.clone(), "new title".to_string(), "new body".to_string())
            .await
            .unwrap();

        let tasks = repository.get_all_tasks().await.unwrap();
        assert_eq!(tasks[0].task_id, task_id);
        assert_eq!(tasks[0].title, "new title");
        assert_eq!(tasks[0].body, "new body");
        // createdAt is untouched by updates
        assert_eq!(tasks[0].created_at, "01 Jan 2025, 00:00");
    }

    #[tokio::test]
    async fn delete_of_unknown_identifier_reports_success() {
        let (repository, _) = memory_repository();
        repository.delete_task("abc123".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn update_of_unknown_identifier_reports_remote_failure() {
        let (repository, _) = memory_repository();
        let result = repository
            .update_task("ghost".to_string(), "t".to_string(), "b".to_string())
            .await;
        assert!(matches!(result, Err(TaskError::Remote(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_fetch_resolves_to_timeout_at_the_deadline() {
        let repository = stalling_repository();

        let started = tokio::time::Instant::now();
        let result = repository.get_all_tasks().await;

        assert_eq!(result, Err(TaskError::Timeout));
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn every_operation_is_deadline_bounded() {
        let repository = stalling_repository();

        assert_eq!(
            repository.add_task("t".to_string(), "b".to_string()).await,
            Err(TaskError::Timeout)
        );
        assert_eq!(
            repository.delete_task("id".to_string()).await,
            Err(TaskError::Timeout)
        );
        assert_eq!(
            repository
                .update_task("id".to_string(), "t".to_string(), "b".to_string())
                .await,
            Err(TaskError::Timeout)
        );
    }

    #[tokio::test]
    async fn timeout_failure_carries_the_connectivity_message() {
        let repository = RemoteTaskRepository::with_config(
            Arc::new(StallingStore),
            Arc::new(test_clock()),
            RepositoryConfig::default().with_call_timeout(Duration::from_millis(10)),
        );

        let error = repository.get_all_tasks().await.unwrap_err();
        assert_eq!(error.to_string(), CONNECTIVITY_MESSAGE);
    }
}
