#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coupon_core::{ClaimController, LockCoordinator, LockStore, MemoryLockStore, RedemptionController};
use coupon_persistence::{
    ClaimDetail, ClaimInfo, ClaimIssue, ClaimPersistence, CouponInfo, CouponPersistence,
    CustomerInfo, CustomerPersistence, DiscountKind, MemoryPersistService, NewCoupon,
    PersistenceService, StorageMode,
};
use rust_decimal::Decimal;

pub struct Fixture {
    pub persistence: Arc<MemoryPersistService>,
    pub locks: Arc<MemoryLockStore>,
    pub claims: ClaimController,
    pub redemptions: RedemptionController,
    pub customer_id: String,
    pub coupon_id: String,
}

/// One customer and one coupon with `stock` units, memory backends
pub async fn fixture(stock: i32) -> Fixture {
    let persistence = Arc::new(MemoryPersistService::new());
    let locks = Arc::new(MemoryLockStore::new());

    let customer = persistence.customer_create("王小龜").await.unwrap();
    let coupon = create_coupon(&persistence, "25% Discount", stock).await;

    Fixture {
        claims: ClaimController::new(persistence.clone(), LockCoordinator::new(locks.clone())),
        redemptions: RedemptionController::new(persistence.clone()),
        persistence,
        locks,
        customer_id: customer.id,
        coupon_id: coupon.id,
    }
}

pub async fn create_coupon(persistence: &MemoryPersistService, name: &str, stock: i32) -> CouponInfo {
    persistence
        .coupon_create(NewCoupon {
            name: name.to_string(),
            discount_type: DiscountKind::Percentage,
            discount_value: Decimal::new(2500, 2),
            total_issued: stock,
            expires_at: Utc::now() + chrono::Duration::days(30),
        })
        .await
        .unwrap()
}

/// Lock store that counts calls and delegates to a memory store
#[derive(Default)]
pub struct CountingLockStore {
    pub inner: MemoryLockStore,
    pub acquires: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CountingLockStore {
    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LockStore for CountingLockStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<bool> {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        self.inner.set_if_absent(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }
}

/// Lock store whose backend is unreachable
pub struct UnreachableLockStore;

#[async_trait]
impl LockStore for UnreachableLockStore {
    async fn set_if_absent(&self, _: &str, _: &str, _: Duration) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }

    async fn delete(&self, _: &str) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

/// Persistence whose backend is unreachable
pub struct UnreachablePersistence;

#[async_trait]
impl CustomerPersistence for UnreachablePersistence {
    async fn customer_find_all(&self) -> anyhow::Result<Vec<CustomerInfo>> {
        anyhow::bail!("database unreachable")
    }

    async fn customer_count(&self) -> anyhow::Result<u64> {
        anyhow::bail!("database unreachable")
    }

    async fn customer_create(&self, _: &str) -> anyhow::Result<CustomerInfo> {
        anyhow::bail!("database unreachable")
    }
}

#[async_trait]
impl CouponPersistence for UnreachablePersistence {
    async fn coupon_find_all(&self) -> anyhow::Result<Vec<CouponInfo>> {
        anyhow::bail!("database unreachable")
    }

    async fn coupon_create(&self, _: NewCoupon) -> anyhow::Result<CouponInfo> {
        anyhow::bail!("database unreachable")
    }
}

#[async_trait]
impl ClaimPersistence for UnreachablePersistence {
    async fn claim_issue(&self, _: &str, _: &str, _: DateTime<Utc>) -> anyhow::Result<ClaimIssue> {
        anyhow::bail!("database unreachable")
    }

    async fn claim_find_unused(&self, _: &str, _: &str) -> anyhow::Result<Option<ClaimInfo>> {
        anyhow::bail!("database unreachable")
    }

    async fn claim_mark_used(&self, _: &str, _: DateTime<Utc>) -> anyhow::Result<bool> {
        anyhow::bail!("database unreachable")
    }

    async fn claim_find_by_customer(&self, _: &str) -> anyhow::Result<Vec<ClaimDetail>> {
        anyhow::bail!("database unreachable")
    }
}

#[async_trait]
impl PersistenceService for UnreachablePersistence {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        anyhow::bail!("database unreachable")
    }
}

/// Memory persistence whose claim transaction stalls before touching stock,
/// recording how many claim transactions overlap
pub struct SlowPersistence {
    pub inner: Arc<MemoryPersistService>,
    pub delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowPersistence {
    pub fn new(inner: Arc<MemoryPersistService>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerPersistence for SlowPersistence {
    async fn customer_find_all(&self) -> anyhow::Result<Vec<CustomerInfo>> {
        self.inner.customer_find_all().await
    }

    async fn customer_count(&self) -> anyhow::Result<u64> {
        self.inner.customer_count().await
    }

    async fn customer_create(&self, name: &str) -> anyhow::Result<CustomerInfo> {
        self.inner.customer_create(name).await
    }
}

#[async_trait]
impl CouponPersistence for SlowPersistence {
    async fn coupon_find_all(&self) -> anyhow::Result<Vec<CouponInfo>> {
        self.inner.coupon_find_all().await
    }

    async fn coupon_create(&self, coupon: NewCoupon) -> anyhow::Result<CouponInfo> {
        self.inner.coupon_create(coupon).await
    }
}

#[async_trait]
impl ClaimPersistence for SlowPersistence {
    async fn claim_issue(
        &self,
        customer_id: &str,
        coupon_id: &str,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<ClaimIssue> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.inner.claim_issue(customer_id, coupon_id, claimed_at).await
    }

    async fn claim_find_unused(
        &self,
        customer_id: &str,
        coupon_id: &str,
    ) -> anyhow::Result<Option<ClaimInfo>> {
        self.inner.claim_find_unused(customer_id, coupon_id).await
    }

    async fn claim_mark_used(&self, claim_id: &str, used_at: DateTime<Utc>) -> anyhow::Result<bool> {
        self.inner.claim_mark_used(claim_id, used_at).await
    }

    async fn claim_find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<ClaimDetail>> {
        self.inner.claim_find_by_customer(customer_id).await
    }
}

#[async_trait]
impl PersistenceService for SlowPersistence {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Memory
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
