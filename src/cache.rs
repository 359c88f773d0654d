// In-memory request cache.
// Keeps the last successful payload per request key for a fixed TTL so
// components mounting at the same time share one API call instead of
// burning the anonymous rate limit.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Result;

/// Default TTL for cached responses: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Delay inserted before a network call to smooth mount-time bursts.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(50);

struct CacheEntry {
    payload: Value,
    fetched_at: Instant,
}

/// Process-lifetime response cache, constructed once at application
/// start and handed to both fetchers.
pub struct RequestCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    fetch_delay: Duration,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            fetch_delay: DEFAULT_FETCH_DELAY,
        }
    }

    /// Override the burst-smoothing delay (tests use zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Return the cached payload for `key` if it is younger than the
    /// TTL; otherwise run `fetch`, store its result, and return it.
    ///
    /// A failed fetch leaves any existing entry untouched and propagates
    /// the error. Two concurrent misses for the same key may both hit
    /// the network; the cache does not single-flight.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if let Some(payload) = self.lookup(key) {
            debug!("cache hit for {}", key);
            return Ok(payload);
        }
        debug!("cache miss for {}", key);

        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        let payload = fetch().await?;
        self.store(key, payload.clone());
        Ok(payload)
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    fn store(&self, key: &str, payload: Value) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
            },
        );
    }
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key for a user's repository list.
pub fn repos_key(username: &str) -> String {
    format!("repos-{}", username)
}

/// Cache key for a tracker repository's comments.
pub fn comments_key(owner: &str, repo: &str) -> String {
    format!("comments-{}-{}", owner, repo)
}
