//! In-memory document store.

use super::{Document, DocumentStore, DocumentStoreError};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory [`DocumentStore`] for demos and tests.
///
/// Collections keep insertion order; `fetch_all` returns exactly that order,
/// which is the "store order" the screen renders.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection (for tests and tooling)
    #[must_use]
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
impl DocumentStore for MemoryDocumentStore {
    fn insert(
        &self,
        collection: String,
        fields: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<String, DocumentStoreError>> + Send + '_>> {
        Box::pin(async move {
            let doc_id = Uuid::new_v4().to_string();
            let mut collections = self.collections.lock().unwrap();
            collections.entry(collection).or_default().push(Document {
                doc_id: doc_id.clone(),
                fields,
            });
            Ok(doc_id)
        })
    }

    fn fetch_all(
        &self,
        collection: String,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Document>, DocumentStoreError>> + Send + '_>> {
        Box::pin(async move {
            let collections = self.collections.lock().unwrap();
            Ok(collections.get(&collection).cloned().unwrap_or_default())
        })
    }

    fn update(
        &self,
        collection: String,
        doc_id: String,
        fields: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>> {
        Box::pin(async move {
            let mut collections = self.collections.lock().unwrap();
            let document = collections
                .get_mut(&collection)
                .and_then(|documents| documents.iter_mut().find(|d| d.doc_id == doc_id));

            match document {
                Some(document) => {
                    document.fields.extend(fields);
                    Ok(())
                },
                None => Err(DocumentStoreError::MissingDocument(doc_id)),
            }
        })
    }

    fn delete(
        &self,
        collection: String,
        doc_id: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>> {
        Box::pin(async move {
            let mut collections = self.collections.lock().unwrap();
            if let Some(documents) = collections.get_mut(&collection) {
                documents.retain(|d| d.doc_id != doc_id);
            }
            // A missing identifier deletes nothing and still succeeds.
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn fetch_all_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        let first = store
            .insert("tasks".to_string(), fields(&[("title", "one")]))
            .await
            .unwrap();
        let second = store
            .insert("tasks".to_string(), fields(&[("title", "two")]))
            .await
            .unwrap();

        let documents = store.fetch_all("tasks".to_string()).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].doc_id, first);
        assert_eq!(documents[1].doc_id, second);
    }

    #[tokio::test]
    async fn unknown_collection_is_empty_not_an_error() {
        let store = MemoryDocumentStore::new();
        let documents = store.fetch_all("nothing".to_string()).await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn update_merges_only_the_given_fields() {
        let store = MemoryDocumentStore::new();
        let doc_id = store
            .insert(
                "tasks".to_string(),
                fields(&[("title", "old"), ("createdAt", "kept")]),
            )
            .await
            .unwrap();

        store
            .update(
                "tasks".to_string(),
                doc_id.clone(),
                fields(&[("title", "new")]),
            )
            .await
            .unwrap();

        let documents = store.fetch_all("tasks".to_string()).await.unwrap();
        assert_eq!(documents[0].field("title"), Some("new"));
        assert_eq!(documents[0].field("createdAt"), Some("kept"));
    }

    #[tokio::test]
    async fn update_of_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let result = store
            .update("tasks".to_string(), "ghost".to_string(), fields(&[]))
            .await;
        assert!(matches!(
            result,
            Err(DocumentStoreError::MissingDocument(id)) if id == "ghost"
        ));
    }

    #[tokio::test]
    async fn delete_of_missing_document_succeeds() {
        let store = MemoryDocumentStore::new();
        store
            .delete("tasks".to_string(), "ghost".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = MemoryDocumentStore::new();
        let keep = store
            .insert("tasks".to_string(), fields(&[("title", "keep")]))
            .await
            .unwrap();
        let doomed = store
            .insert("tasks".to_string(), fields(&[("title", "doomed")]))
            .await
            .unwrap();

        store.delete("tasks".to_string(), doomed).await.unwrap();

        let documents = store.fetch_all("tasks".to_string()).await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].doc_id, keep);
    }
}
