//! In-process implementation of the view cache port.
//!
//! A mutex-guarded map from request path to rendered body. Good enough for a
//! single-process deployment; the port keeps the door open for an external
//! cache without touching the domain.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ViewCache, ViewCacheError};

/// Path-keyed in-memory cache of rendered views.
#[derive(Default)]
pub struct InMemoryViewCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryViewCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, ViewCacheError> {
        self.entries
            .lock()
            .map_err(|_| ViewCacheError::backend("view cache lock poisoned"))
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn get(&self, path: &str) -> Result<Option<String>, ViewCacheError> {
        Ok(self.lock()?.get(path).cloned())
    }

    async fn put(&self, path: &str, body: &str) -> Result<(), ViewCacheError> {
        self.lock()?.insert(path.to_owned(), body.to_owned());
        Ok(())
    }

    async fn invalidate(&self, path: &str) -> Result<(), ViewCacheError> {
        self.lock()?.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_invalidate_round_trip() {
        let cache = InMemoryViewCache::new();
        assert_eq!(cache.get("/dashboard/invoices").await.expect("get"), None);

        cache
            .put("/dashboard/invoices", "[]")
            .await
            .expect("put succeeds");
        assert_eq!(
            cache.get("/dashboard/invoices").await.expect("get"),
            Some("[]".to_owned())
        );

        cache
            .invalidate("/dashboard/invoices")
            .await
            .expect("invalidate succeeds");
        assert_eq!(cache.get("/dashboard/invoices").await.expect("get"), None);
    }

    #[tokio::test]
    async fn invalidation_is_path_scoped() {
        let cache = InMemoryViewCache::new();
        cache.put("/a", "body-a").await.expect("put succeeds");
        cache.put("/b", "body-b").await.expect("put succeeds");

        cache.invalidate("/a").await.expect("invalidate succeeds");

        assert_eq!(cache.get("/a").await.expect("get"), None);
        assert_eq!(cache.get("/b").await.expect("get"), Some("body-b".to_owned()));
    }
}
