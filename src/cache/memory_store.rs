use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::cache::store::{checked_ttl, StoreError, TokenStore};

#[derive(Debug, Clone)]
struct Entry {
    fields: HashMap<String, String>,
    /// `None` when the TTL does not fit the clock
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// In-process token store with Redis-like hash and expiry semantics.
///
/// Expiry follows the tokio clock, so paused-time tests can move it forward.
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable store: every command fails while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Remaining time to live of `key`, like Redis `TTL`
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.inner
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .and_then(|entry| entry.expires_at)
            .map(|expires_at| expires_at - now)
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_owned()));
        }
        Ok(())
    }
}

impl TokenStore for MemoryStore {
    async fn get_all_fields(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        self.ensure_online()?;
        let now = Instant::now();
        Ok(self
            .inner
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now) && !entry.fields.is_empty())
            .map(|entry| entry.fields.clone()))
    }

    async fn set_fields_with_expiry(
        &self,
        key: &str,
        fields: HashMap<String, String>,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        self.ensure_online()?;
        checked_ttl(ttl_seconds)?;
        // one write guard covers both steps
        let mut map = self.inner.write().await;

        let now = Instant::now();
        map.retain(|_, entry| entry.is_live(now));

        // a zero TTL deletes the key, as EXPIRE 0 does
        if ttl_seconds == 0 {
            map.remove(key);
            return Ok(());
        }

        let expires_at = now.checked_add(Duration::from_secs(ttl_seconds));
        match map.get_mut(key) {
            Some(entry) => {
                entry.fields.extend(fields);
                entry.expires_at = expires_at;
            }
            None => {
                map.insert(key.to_owned(), Entry { fields, expires_at });
            }
        }
        Ok(())
    }
}
