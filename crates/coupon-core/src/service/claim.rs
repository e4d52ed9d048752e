// Inventory claim controller
// Serializes claims per coupon with the lock coordinator and issues stock
// through a single persistence transaction

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use coupon_common::{CouponError, validate_id};
use coupon_persistence::{ClaimInfo, ClaimIssue, PersistenceService};
use tokio::time::{Instant, timeout_at};
use tracing::{error, info, warn};

use crate::lock::{DEFAULT_LOCK_TTL, LockCoordinator, coupon_lock_key};

/// Issues coupon stock to customers without overselling
#[derive(Clone)]
pub struct ClaimController {
    persistence: Arc<dyn PersistenceService>,
    locks: LockCoordinator,
    lock_ttl: Duration,
}

impl ClaimController {
    pub fn new(persistence: Arc<dyn PersistenceService>, locks: LockCoordinator) -> Self {
        Self {
            persistence,
            locks,
            lock_ttl: DEFAULT_LOCK_TTL,
        }
    }

    /// Override the lifetime of the per-coupon lock
    pub fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        self.lock_ttl = ttl;
        self
    }

    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    /// Claim one unit of `coupon_id` for `customer_id`
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for an empty or malformed id, or an unknown customer
    /// - `Busy` when the coupon lock is held, a store is unavailable, or the
    ///   transaction does not finish within the lock lifetime
    /// - `SoldOut` when the coupon is unknown or has no stock left
    pub async fn claim(&self, customer_id: &str, coupon_id: &str) -> Result<ClaimInfo, CouponError> {
        let customer_id = validate_id("customer_id", customer_id)?;
        let coupon_id = validate_id("coupon_id", coupon_id)?;

        // Taken before the lock so the deadline never outlives the lock
        let deadline = Instant::now() + self.lock_ttl;

        let key = coupon_lock_key(coupon_id);
        if !self.locks.acquire(&key, self.lock_ttl).await {
            info!(customer_id, coupon_id, "Claim rejected, coupon busy");
            return Err(CouponError::Busy);
        }

        // An abandoned transaction is dropped uncommitted and rolls back
        let outcome = timeout_at(
            deadline,
            self.persistence
                .claim_issue(customer_id, coupon_id, Utc::now()),
        )
        .await;

        self.locks.release(&key).await;

        let Ok(outcome) = outcome else {
            warn!(
                customer_id,
                coupon_id,
                lock_ttl_ms = self.lock_ttl.as_millis() as u64,
                "Claim abandoned, lock lifetime elapsed"
            );
            return Err(CouponError::Busy);
        };

        match outcome {
            Ok(ClaimIssue::Issued(claim)) => {
                info!(customer_id, coupon_id, claim_id = %claim.id, "Coupon claimed");
                Ok(claim)
            }
            Ok(ClaimIssue::SoldOut) => {
                info!(customer_id, coupon_id, "Claim rejected, sold out");
                Err(CouponError::SoldOut)
            }
            Ok(ClaimIssue::UnknownCustomer) => {
                warn!(customer_id, coupon_id, "Claim rejected, unknown customer");
                Err(CouponError::InvalidRequest(format!(
                    "customer '{}' does not exist",
                    customer_id
                )))
            }
            Err(e) => {
                error!(customer_id, coupon_id, error = %e, "Claim transaction failed");
                Err(CouponError::Busy)
            }
        }
    }
}
