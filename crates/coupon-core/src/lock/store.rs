use std::time::Duration;

use async_trait::async_trait;

/// Key-value store with an atomic set-if-absent primitive
///
/// Errors mean the store could not be reached or answered garbage; contention
/// is reported as `Ok(false)`.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Create `key` holding `value` with expiry `ttl` only if it is absent
    ///
    /// Returns `true` iff the key was created by this call.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<bool>;

    /// Remove `key`; removing an absent key succeeds
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
