//! The remote document-store seam.
//!
//! The task repository talks to a flat collection of schema-less documents
//! through the [`DocumentStore`] trait. The wire protocol behind it is an
//! external collaborator's concern; this module only fixes the field
//! contract the repository relies on: string fields, no enforcement beyond
//! presence, missing fields default to empty on read.
//!
//! # Dyn Compatibility
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn DocumentStore>`). This
//! is required for the effect system, where reducers create effects that
//! capture the store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryDocumentStore;

/// Field holding a task's title.
pub const FIELD_TITLE: &str = "title";

/// Field holding a task's body.
pub const FIELD_BODY: &str = "body";

/// Field holding a task's creation timestamp, serialized as a string.
pub const FIELD_CREATED_AT: &str = "createdAt";

/// A schema-less record in a flat collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned unique identifier
    pub doc_id: String,
    /// String fields; no schema is enforced beyond field presence
    pub fields: HashMap<String, String>,
}

impl Document {
    /// Look up a field value
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Look up a field value, defaulting to the empty string when absent
    #[must_use]
    pub fn field_or_empty(&self, name: &str) -> String {
        self.field(name).unwrap_or_default().to_string()
    }
}

/// Errors that can occur during document store operations.
#[derive(Error, Debug, Clone)]
pub enum DocumentStoreError {
    /// Failed to reach the store
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The store rejected or failed the operation
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// The target document does not exist
    #[error("No such document: {0}")]
    MissingDocument(String),
}

/// Flat document collection abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely shared across the
/// effect tasks that capture them.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document; the store assigns and returns its identifier.
    fn insert(
        &self,
        collection: String,
        fields: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<String, DocumentStoreError>> + Send + '_>>;

    /// Fetch every document in the collection, in store order.
    ///
    /// An unknown collection is empty, not an error.
    fn fetch_all(
        &self,
        collection: String,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Document>, DocumentStoreError>> + Send + '_>>;

    /// Merge the given fields into an existing document; fields not named
    /// are left untouched.
    fn update(
        &self,
        collection: String,
        doc_id: String,
        fields: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>>;

    /// Delete a document.
    ///
    /// Deleting a missing identifier is a no-op success.
    fn delete(
        &self,
        collection: String,
        doc_id: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), DocumentStoreError>> + Send + '_>>;
}
