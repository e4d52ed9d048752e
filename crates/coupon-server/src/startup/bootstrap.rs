//! Backend construction from configuration

use std::sync::Arc;
use std::time::Duration;

use coupon_core::{LockStore, MemoryLockStore, RedisLockStore};
use coupon_persistence::{
    ExternalDbPersistService, MemoryPersistService, PersistenceService, StorageMode,
    seed_if_empty, sync_schema,
};
use tracing::info;

use crate::model::{Configuration, LockStoreKind};

/// Sweep interval of the in-memory lock store
const LOCK_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Connect the persistence backend, sync the schema and seed reference data
pub async fn init_persistence(
    configuration: &Configuration,
) -> anyhow::Result<Arc<dyn PersistenceService>> {
    let persistence: Arc<dyn PersistenceService> = match configuration.persistence_mode() {
        StorageMode::ExternalDb => {
            let db = configuration.database_connection().await?;
            sync_schema(&db).await?;
            Arc::new(ExternalDbPersistService::new(db))
        }
        StorageMode::Memory => Arc::new(MemoryPersistService::new()),
    };

    info!(mode = %persistence.storage_mode(), "Persistence initialized");

    if configuration.seed_enabled() && seed_if_empty(persistence.as_ref()).await? {
        info!("Reference customers and coupons seeded");
    }

    Ok(persistence)
}

/// Connect the lock store selected by `lock.store`
pub async fn init_lock_store(configuration: &Configuration) -> anyhow::Result<Arc<dyn LockStore>> {
    let store: Arc<dyn LockStore> = match configuration.lock_store() {
        LockStoreKind::Redis => {
            let store = RedisLockStore::connect(&configuration.redis_url()).await?;
            store.ping().await?;
            Arc::new(store)
        }
        LockStoreKind::Memory => {
            Arc::new(MemoryLockStore::new().with_cleanup(LOCK_SWEEP_INTERVAL))
        }
    };

    info!(
        store = ?configuration.lock_store(),
        ttl_secs = configuration.lock_ttl().as_secs(),
        "Lock store initialized"
    );
    Ok(store)
}
