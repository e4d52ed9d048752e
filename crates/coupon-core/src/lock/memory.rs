// In-process lock store
// Set-if-absent with automatic expiry on top of DashMap

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::JoinHandle;
use tracing::debug;

use super::store::LockStore;

/// A held lock entry
struct LockEntry {
    value: String,
    acquired_at: Instant,
    ttl: Duration,
}

impl LockEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            acquired_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.acquired_at.elapsed() >= self.ttl
    }
}

/// In-memory lock store using DashMap
///
/// Expired entries are treated as absent on the next `set_if_absent`, so the
/// sweeper started by [`MemoryLockStore::with_cleanup`] only bounds memory.
#[derive(Default)]
pub struct MemoryLockStore {
    locks: Arc<DashMap<String, LockEntry>>,
    cleanup_handle: Option<JoinHandle<()>>,
}

impl MemoryLockStore {
    /// Create a store without a background sweeper
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a background task removing expired entries every `interval`
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_cleanup(self, interval: Duration) -> Self {
        let locks = self.locks.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                Self::cleanup_expired(&locks);
            }
        });

        Self {
            locks: self.locks.clone(),
            cleanup_handle: Some(handle),
        }
    }

    fn cleanup_expired(locks: &DashMap<String, LockEntry>) {
        let before = locks.len();
        locks.retain(|_, entry| !entry.is_expired());

        let removed = before.saturating_sub(locks.len());
        if removed > 0 {
            debug!(count = removed, "Cleaned up expired lock entries");
        }
    }

    /// Whether `key` is currently held (present and not expired)
    pub fn is_locked(&self, key: &str) -> bool {
        self.locks
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    /// Value stored under a live `key`
    pub fn holder(&self, key: &str) -> Option<String> {
        self.locks
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Number of entries, expired ones included until swept
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for MemoryLockStore {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<bool> {
        // The entry guard holds the shard lock for the whole check-and-insert
        match self.locks.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(LockEntry::new(value, ttl));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(LockEntry::new(value, ttl));
                Ok(true)
            }
        }
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.locks.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_if_absent_and_delete() {
        let store = MemoryLockStore::new();

        assert!(store.set_if_absent("key1", "locked", TTL).await.unwrap());
        assert!(!store.set_if_absent("key1", "locked", TTL).await.unwrap());
        assert_eq!(store.holder("key1").as_deref(), Some("locked"));

        store.delete("key1").await.unwrap();
        assert!(!store.is_locked("key1"));
        assert!(store.set_if_absent("key1", "locked", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = MemoryLockStore::new();
        assert!(store.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_independent_keys() {
        let store = MemoryLockStore::new();

        assert!(store.set_if_absent("key1", "locked", TTL).await.unwrap());
        assert!(store.set_if_absent("key2", "locked", TTL).await.unwrap());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_counts_as_absent() {
        let store = MemoryLockStore::new();

        assert!(
            store
                .set_if_absent("key1", "locked", Duration::from_millis(20))
                .await
                .unwrap()
        );
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(!store.is_locked("key1"));
        assert!(store.set_if_absent("key1", "locked", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired_entries() {
        let store = MemoryLockStore::new().with_cleanup(Duration::from_millis(10));

        store
            .set_if_absent("key1", "locked", Duration::from_millis(5))
            .await
            .unwrap();
        store.set_if_absent("key2", "locked", TTL).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.len(), 1);
        assert!(store.is_locked("key2"));
    }
}
