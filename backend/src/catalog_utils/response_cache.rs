//! In-memory cache of raw catalog responses keyed by request digest.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct CachedResponse {
    body: String,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    /// Digest used as the cache key of a request body.
    pub fn key_for(request_body: &str) -> String {
        sha256::digest(request_body.to_string())
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.body.clone())
    }

    pub async fn insert(&self, key: String, body: String) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() <= ttl);
        entries.insert(key, CachedResponse { body, stored_at: Instant::now() });
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
