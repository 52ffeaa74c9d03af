//! Per-client submission rate limiting.
//!
//! Fixed-window counting: each client gets a `{window_start, hits}` record
//! keyed by a hash of its network address. A record whose window has elapsed
//! counts as absent. The window is anchored at the first hit and is not
//! extended by traffic inside it.

use std::hash::{Hash, Hasher};
use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::RateLimitConfig;
use crate::error::SubmitError;

/// One client's counter for the current window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRecord {
    pub window_start: Instant,
    pub hits: u32,
}

/// Keyed, time-windowed counter store.
///
/// `increment` performs the whole read-modify-write for one request and
/// returns the hit count including that request. Implementations must make
/// the read-modify-write atomic per key so concurrent requests from the same
/// client cannot lose updates.
pub trait RateLimitStore: Send + Sync {
    fn increment(&self, key: &str, window: Duration) -> u32;

    /// Drop records whose window has elapsed. Optional housekeeping; expired
    /// records are already ignored by `increment`.
    fn purge_expired(&self, _window: Duration) {}
}

/// In-memory store backed by a concurrent map.
///
/// The map's per-key entry lock guards the read-modify-write.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    records: DashMap<String, RateLimitRecord>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn insert_record(&self, key: &str, record: RateLimitRecord) {
        self.records.insert(key.to_string(), record);
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn increment(&self, key: &str, window: Duration) -> u32 {
        let now = Instant::now();
        let mut entry = self
            .records
            .entry(key.to_string())
            .or_insert(RateLimitRecord { window_start: now, hits: 0 });

        // Expired window: the old record is treated as absent, not decremented.
        if now.duration_since(entry.window_start) > window {
            entry.window_start = now;
            entry.hits = 0;
        }

        entry.hits += 1;
        entry.hits
    }

    fn purge_expired(&self, window: Duration) {
        let now = Instant::now();
        self.records
            .retain(|_, record| now.duration_since(record.window_start) <= window);
    }
}

/// Rate-limit policy over an injected store.
pub struct RateLimiter {
    store: Box<dyn RateLimitStore>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(store: Box<dyn RateLimitStore>, config: &RateLimitConfig) -> Self {
        Self {
            store,
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
        }
    }

    pub fn in_memory(config: &RateLimitConfig) -> Self {
        Self::new(Box::new(InMemoryRateLimitStore::new()), config)
    }

    /// Count this request against the client and decide whether it may
    /// proceed. The count is written back even when the request is rejected,
    /// so abusive clients keep counting.
    pub fn check(&self, client: IpAddr) -> Result<(), SubmitError> {
        let key = client_key(client);
        let hits = self.store.increment(&key, self.window);
        if hits > self.max_requests {
            tracing::warn!(client_key = %key, hits, "rate limit exceeded");
            return Err(SubmitError::RateLimited);
        }
        Ok(())
    }

    pub fn purge_expired(&self) {
        self.store.purge_expired(self.window);
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Stable hash of the client address; raw IPs stay out of the store.
fn client_key(client: IpAddr) -> String {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    client.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
