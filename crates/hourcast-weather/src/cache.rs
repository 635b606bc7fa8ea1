//! TTL key/value store for whole-day weather payloads.
//!
//! Keys are the raw location strings, case-sensitive and unnormalized:
//! "Paris" and "paris" are distinct entries (preserved behavior, see
//! DESIGN.md). Entries are only ever replaced wholesale; expiry is the
//! backend's job.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use redis::AsyncCommands;

use crate::error::CacheError;

/// Key/value cache with per-entry TTL.
///
/// Two backends behind one type: the redis-backed store used in production
/// and an in-process map for tests and cacheless development.
#[derive(Clone)]
pub enum CacheStore {
    Redis(redis::aio::MultiplexedConnection),
    Memory(Arc<Mutex<HashMap<String, MemoryEntry>>>),
}

#[derive(Debug, Clone)]
pub struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl CacheStore {
    /// Connect to the redis backend and verify it with a PING.
    ///
    /// A backend that cannot be reached at startup is a fatal condition
    /// for the service; callers are expected to abort rather than serve
    /// traffic without a cache.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Connection(e.to_string()))?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        tracing::info!(%url, %pong, "connected to cache backend");
        Ok(Self::Redis(conn))
    }

    /// In-process backend with the same TTL semantics.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Fetch the entry under `key`; expired entries read as absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let value: Option<String> = conn.get(key).await?;
                Ok(value)
            }
            Self::Memory(map) => {
                let mut map = map.lock();
                if let Some(entry) = map.get(key) {
                    if entry.expires_at > Instant::now() {
                        return Ok(Some(entry.value.clone()));
                    }
                    map.remove(key);
                }
                Ok(None)
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry wholesale.
    pub async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let _: () = conn.set_ex(key, value, ttl.as_secs()).await?;
                Ok(())
            }
            Self::Memory(map) => {
                map.lock().insert(
                    key.to_string(),
                    MemoryEntry {
                        value: value.to_string(),
                        expires_at: Instant::now() + ttl,
                    },
                );
                Ok(())
            }
        }
    }
}
