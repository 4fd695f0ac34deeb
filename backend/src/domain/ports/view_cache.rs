//! Port interface for the path-scoped cache of rendered views.

use async_trait::async_trait;

/// Errors surfaced by the caching adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewCacheError {
    /// Cache backend is unavailable or corrupted.
    #[error("view cache backend failure: {message}")]
    Backend {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl ViewCacheError {
    /// Create a backend error with the given message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Cache of rendered views keyed by request path.
///
/// Mutation actions call [`ViewCache::invalidate`] after every successful
/// write so the next read recomputes the view; cache failures never fail the
/// mutation itself.
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Read the cached body for a path.
    async fn get(&self, path: &str) -> Result<Option<String>, ViewCacheError>;

    /// Store a rendered body for a path.
    async fn put(&self, path: &str, body: &str) -> Result<(), ViewCacheError>;

    /// Drop any cached body for a path so it is recomputed on next access.
    async fn invalidate(&self, path: &str) -> Result<(), ViewCacheError>;
}
