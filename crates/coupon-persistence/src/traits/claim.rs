//! Claim persistence trait
//!
//! Operations backing the claim and redemption controllers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{ClaimDetail, ClaimInfo, ClaimIssue};

/// Claim (customer coupon) operations
#[async_trait]
pub trait ClaimPersistence: Send + Sync {
    /// Issue one unit of a coupon to a customer as a single transaction
    ///
    /// Reads the coupon filtered by `remaining > 0`, writes back the read value
    /// minus one, verifies the customer exists and inserts the claim row. Either
    /// every write lands or none does.
    async fn claim_issue(
        &self,
        customer_id: &str,
        coupon_id: &str,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<ClaimIssue>;

    /// Find the earliest unused claim (by `claimed_at`, then `id`)
    async fn claim_find_unused(
        &self,
        customer_id: &str,
        coupon_id: &str,
    ) -> anyhow::Result<Option<ClaimInfo>>;

    /// Mark a claim used, only if it is still unused
    ///
    /// Returns `true` iff exactly one row transitioned.
    async fn claim_mark_used(&self, claim_id: &str, used_at: DateTime<Utc>)
    -> anyhow::Result<bool>;

    /// List a customer's claims joined with customer and coupon
    async fn claim_find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<ClaimDetail>>;
}
