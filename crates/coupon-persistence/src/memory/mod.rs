//! In-memory persistence backend
//!
//! Keeps the three tables in process behind a single `RwLock`. Every write
//! operation takes the write guard once, so a claim is all-or-nothing exactly
//! like the transactional SQL path. Used by tests and by `persistence.mode = memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::*;
use crate::traits::*;

#[derive(Default)]
struct Tables {
    customers: HashMap<String, CustomerInfo>,
    coupons: HashMap<String, CouponInfo>,
    claims: Vec<ClaimInfo>,
}

/// In-process persistence service
#[derive(Default)]
pub struct MemoryPersistService {
    tables: RwLock<Tables>,
}

impl MemoryPersistService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current remaining stock of a coupon, if it exists
    pub fn remaining(&self, coupon_id: &str) -> Option<i32> {
        self.tables.read().coupons.get(coupon_id).map(|c| c.remaining)
    }

    /// All claims recorded for a coupon
    pub fn claims_for_coupon(&self, coupon_id: &str) -> Vec<ClaimInfo> {
        self.tables
            .read()
            .claims
            .iter()
            .filter(|c| c.coupon_id == coupon_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PersistenceService for MemoryPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Memory
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl CustomerPersistence for MemoryPersistService {
    async fn customer_find_all(&self) -> anyhow::Result<Vec<CustomerInfo>> {
        let mut customers: Vec<CustomerInfo> =
            self.tables.read().customers.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn customer_count(&self) -> anyhow::Result<u64> {
        Ok(self.tables.read().customers.len() as u64)
    }

    async fn customer_create(&self, name: &str) -> anyhow::Result<CustomerInfo> {
        validate_customer_name(name)?;

        let mut tables = self.tables.write();
        if tables.customers.values().any(|c| c.name == name) {
            anyhow::bail!("customer '{}' already exists", name);
        }

        let customer = CustomerInfo {
            id: new_id(),
            name: name.to_string(),
        };
        tables
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }
}

#[async_trait]
impl CouponPersistence for MemoryPersistService {
    async fn coupon_find_all(&self) -> anyhow::Result<Vec<CouponInfo>> {
        let mut coupons: Vec<CouponInfo> = self.tables.read().coupons.values().cloned().collect();
        coupons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(coupons)
    }

    async fn coupon_create(&self, new_coupon: NewCoupon) -> anyhow::Result<CouponInfo> {
        new_coupon.validate()?;

        let mut tables = self.tables.write();
        if tables.coupons.values().any(|c| c.name == new_coupon.name) {
            anyhow::bail!("coupon '{}' already exists", new_coupon.name);
        }

        let coupon = CouponInfo {
            id: new_id(),
            name: new_coupon.name,
            discount_type: new_coupon.discount_type,
            discount_value: new_coupon.discount_value,
            total_issued: new_coupon.total_issued,
            remaining: new_coupon.total_issued,
            expires_at: new_coupon.expires_at,
        };
        tables.coupons.insert(coupon.id.clone(), coupon.clone());
        Ok(coupon)
    }
}

#[async_trait]
impl ClaimPersistence for MemoryPersistService {
    async fn claim_issue(
        &self,
        customer_id: &str,
        coupon_id: &str,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<ClaimIssue> {
        let mut tables = self.tables.write();

        let remaining = match tables.coupons.get(coupon_id) {
            Some(coupon) if coupon.remaining > 0 => coupon.remaining,
            _ => return Ok(ClaimIssue::SoldOut),
        };
        if !tables.customers.contains_key(customer_id) {
            return Ok(ClaimIssue::UnknownCustomer);
        }

        if let Some(coupon) = tables.coupons.get_mut(coupon_id) {
            coupon.remaining = remaining - 1;
        }

        let claim = ClaimInfo {
            id: new_id(),
            customer_id: customer_id.to_string(),
            coupon_id: coupon_id.to_string(),
            used: false,
            claimed_at,
            used_at: None,
        };
        tables.claims.push(claim.clone());

        Ok(ClaimIssue::Issued(claim))
    }

    async fn claim_find_unused(
        &self,
        customer_id: &str,
        coupon_id: &str,
    ) -> anyhow::Result<Option<ClaimInfo>> {
        Ok(self
            .tables
            .read()
            .claims
            .iter()
            .filter(|c| !c.used && c.customer_id == customer_id && c.coupon_id == coupon_id)
            .min_by(|a, b| a.claimed_at.cmp(&b.claimed_at).then_with(|| a.id.cmp(&b.id)))
            .cloned())
    }

    async fn claim_mark_used(
        &self,
        claim_id: &str,
        used_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut tables = self.tables.write();
        match tables.claims.iter_mut().find(|c| c.id == claim_id && !c.used) {
            Some(claim) => {
                claim.used = true;
                claim.used_at = Some(used_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn claim_find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<ClaimDetail>> {
        let tables = self.tables.read();
        let owner = tables.customers.get(customer_id).cloned();

        let mut claims: Vec<&ClaimInfo> = tables
            .claims
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .collect();
        claims.sort_by(|a, b| a.claimed_at.cmp(&b.claimed_at).then_with(|| a.id.cmp(&b.id)));

        Ok(claims
            .into_iter()
            .map(|claim| ClaimDetail {
                claim: claim.clone(),
                customer: owner.clone(),
                coupon: tables.coupons.get(&claim.coupon_id).cloned(),
            })
            .collect())
    }
}
