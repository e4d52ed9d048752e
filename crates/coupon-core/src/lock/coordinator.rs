use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use super::store::LockStore;

/// Value written under a held lock key
pub const LOCK_SENTINEL: &str = "locked";

/// Lock lifetime used when none is configured
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(5);

/// Lock key guarding the stock of one coupon
pub fn coupon_lock_key(coupon_id: &str) -> String {
    format!("lock_coupon_{}", coupon_id)
}

/// Acquire/release on top of a [`LockStore`]
///
/// `acquire` answers `false` both for contention and for an unreachable
/// store; the two are told apart only in the logs.
#[derive(Clone)]
pub struct LockCoordinator {
    store: Arc<dyn LockStore>,
}

impl LockCoordinator {
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self { store }
    }

    /// Atomically create `key` if absent with expiry `ttl`
    pub async fn acquire(&self, key: &str, ttl: Duration) -> bool {
        match self.store.set_if_absent(key, LOCK_SENTINEL, ttl).await {
            Ok(true) => {
                debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Lock acquired");
                true
            }
            Ok(false) => {
                debug!(key = %key, "Lock held by another caller");
                false
            }
            Err(e) => {
                error!(key = %key, error = %e, "Lock store unavailable during acquire");
                false
            }
        }
    }

    /// Remove `key`; never fails
    pub async fn release(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(()) => debug!(key = %key, "Lock released"),
            // The TTL reclaims the key if the delete was lost
            Err(e) => warn!(key = %key, error = %e, "Failed to release lock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::MemoryLockStore;
    use async_trait::async_trait;

    struct UnreachableStore;

    #[async_trait]
    impl LockStore for UnreachableStore {
        async fn set_if_absent(&self, _: &str, _: &str, _: Duration) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn delete(&self, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn test_coupon_lock_key() {
        assert_eq!(coupon_lock_key("c1"), "lock_coupon_c1");
        assert_ne!(coupon_lock_key("c1"), coupon_lock_key("c2"));
    }

    #[tokio::test]
    async fn test_acquire_release_cycle() {
        let store = Arc::new(MemoryLockStore::new());
        let coordinator = LockCoordinator::new(store.clone());

        assert!(coordinator.acquire("k", DEFAULT_LOCK_TTL).await);
        assert!(!coordinator.acquire("k", DEFAULT_LOCK_TTL).await);
        assert_eq!(store.holder("k").as_deref(), Some(LOCK_SENTINEL));

        coordinator.release("k").await;
        coordinator.release("k").await;
        assert!(coordinator.acquire("k", DEFAULT_LOCK_TTL).await);
    }

    #[tokio::test]
    async fn test_unreachable_store_reads_as_not_acquired() {
        let coordinator = LockCoordinator::new(Arc::new(UnreachableStore));

        assert!(!coordinator.acquire("k", DEFAULT_LOCK_TTL).await);
        coordinator.release("k").await;
    }
}
