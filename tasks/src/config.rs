//! Repository configuration.

use std::time::Duration;

/// Default deadline each remote call is raced against.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Default collection the task documents live in.
pub const DEFAULT_COLLECTION: &str = "tasks";

/// Remote call policy for the task repository.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use taskdeck_tasks::config::RepositoryConfig;
///
/// let config = RepositoryConfig::new("team_tasks")
///     .with_call_timeout(Duration::from_secs(5));
/// assert_eq!(config.collection, "team_tasks");
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Collection the task documents live in
    pub collection: String,
    /// Deadline each remote call is raced against
    pub call_timeout: Duration,
}

impl RepositoryConfig {
    /// Create a configuration for the given collection with the default
    /// deadline
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the per-call deadline
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION)
    }
}
