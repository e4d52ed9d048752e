//! SQL-based persistence backend (MySQL/PostgreSQL via SeaORM)
//!
//! This module implements the `PersistenceService` trait with direct SeaORM
//! queries. The claim path runs inside one database transaction.

pub mod schema;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{prelude::Expr, *};

use crate::entity::{coupon, customer, customer_coupon};
use crate::model::*;
use crate::traits::*;

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements all persistence traits.
pub struct ExternalDbPersistService {
    db: DatabaseConnection,
}

impl ExternalDbPersistService {
    /// Create a new ExternalDbPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ============================================================================
// PersistenceService implementation
// ============================================================================

#[async_trait]
impl PersistenceService for ExternalDbPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}

// ============================================================================
// CustomerPersistence implementation
// ============================================================================

#[async_trait]
impl CustomerPersistence for ExternalDbPersistService {
    async fn customer_find_all(&self) -> anyhow::Result<Vec<CustomerInfo>> {
        let customers = customer::Entity::find()
            .order_by_asc(customer::Column::Name)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(CustomerInfo::from).collect())
    }

    async fn customer_count(&self) -> anyhow::Result<u64> {
        Ok(customer::Entity::find().count(&self.db).await?)
    }

    async fn customer_create(&self, name: &str) -> anyhow::Result<CustomerInfo> {
        validate_customer_name(name)?;

        let existing = customer::Entity::find()
            .filter(customer::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            anyhow::bail!("customer '{}' already exists", name);
        }

        let model = customer::ActiveModel {
            id: Set(new_id()),
            name: Set(name.to_string()),
        };
        let created = model.insert(&self.db).await?;

        tracing::info!(customer_id = %created.id, "customer created");
        Ok(created.into())
    }
}

// ============================================================================
// CouponPersistence implementation
// ============================================================================

#[async_trait]
impl CouponPersistence for ExternalDbPersistService {
    async fn coupon_find_all(&self) -> anyhow::Result<Vec<CouponInfo>> {
        coupon::Entity::find()
            .order_by_asc(coupon::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(CouponInfo::try_from)
            .collect()
    }

    async fn coupon_create(&self, new_coupon: NewCoupon) -> anyhow::Result<CouponInfo> {
        new_coupon.validate()?;

        let model = coupon::ActiveModel {
            id: Set(new_id()),
            name: Set(new_coupon.name),
            discount_type: Set(new_coupon.discount_type.to_string()),
            discount_value: Set(new_coupon.discount_value),
            total_issued: Set(new_coupon.total_issued),
            remaining: Set(new_coupon.total_issued),
            expires_at: Set(new_coupon.expires_at),
        };
        let created = model.insert(&self.db).await?;

        tracing::info!(coupon_id = %created.id, remaining = created.remaining, "coupon created");
        CouponInfo::try_from(created)
    }
}

// ============================================================================
// ClaimPersistence implementation
// ============================================================================

#[async_trait]
impl ClaimPersistence for ExternalDbPersistService {
    async fn claim_issue(
        &self,
        customer_id: &str,
        coupon_id: &str,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<ClaimIssue> {
        // Dropping the transaction without commit rolls it back
        let tx = self.db.begin().await?;

        let Some(found) = coupon::Entity::find_by_id(coupon_id.to_string())
            .filter(coupon::Column::Remaining.gt(0))
            .one(&tx)
            .await?
        else {
            return Ok(ClaimIssue::SoldOut);
        };

        if customer::Entity::find_by_id(customer_id.to_string())
            .one(&tx)
            .await?
            .is_none()
        {
            return Ok(ClaimIssue::UnknownCustomer);
        }

        // Conditional decrement; zero rows means the last unit is already gone
        let result = coupon::Entity::update_many()
            .col_expr(
                coupon::Column::Remaining,
                Expr::col(coupon::Column::Remaining).sub(1),
            )
            .filter(coupon::Column::Id.eq(coupon_id))
            .filter(coupon::Column::Remaining.gt(0))
            .exec(&tx)
            .await?;
        match result.rows_affected {
            1 => {}
            0 => return Ok(ClaimIssue::SoldOut),
            n => anyhow::bail!("stock update for coupon '{}' affected {} rows", coupon_id, n),
        }

        let claim = customer_coupon::ActiveModel {
            id: Set(new_id()),
            customer_id: Set(customer_id.to_string()),
            coupon_id: Set(coupon_id.to_string()),
            used: Set(false),
            claimed_at: Set(claimed_at),
            used_at: Set(None),
        };
        let inserted = claim.insert(&tx).await?;

        tx.commit().await?;

        tracing::debug!(
            claim_id = %inserted.id,
            remaining = found.remaining - 1,
            "claim transaction committed"
        );
        Ok(ClaimIssue::Issued(inserted.into()))
    }

    async fn claim_find_unused(
        &self,
        customer_id: &str,
        coupon_id: &str,
    ) -> anyhow::Result<Option<ClaimInfo>> {
        let claim = customer_coupon::Entity::find()
            .filter(customer_coupon::Column::CustomerId.eq(customer_id))
            .filter(customer_coupon::Column::CouponId.eq(coupon_id))
            .filter(customer_coupon::Column::Used.eq(false))
            .order_by_asc(customer_coupon::Column::ClaimedAt)
            .order_by_asc(customer_coupon::Column::Id)
            .one(&self.db)
            .await?;

        Ok(claim.map(ClaimInfo::from))
    }

    async fn claim_mark_used(
        &self,
        claim_id: &str,
        used_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let result = customer_coupon::Entity::update_many()
            .col_expr(customer_coupon::Column::Used, Expr::value(true))
            .col_expr(customer_coupon::Column::UsedAt, Expr::value(Some(used_at)))
            .filter(customer_coupon::Column::Id.eq(claim_id))
            .filter(customer_coupon::Column::Used.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn claim_find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<ClaimDetail>> {
        let owner = customer::Entity::find_by_id(customer_id.to_string())
            .one(&self.db)
            .await?
            .map(CustomerInfo::from);

        let rows = customer_coupon::Entity::find()
            .filter(customer_coupon::Column::CustomerId.eq(customer_id))
            .order_by_asc(customer_coupon::Column::ClaimedAt)
            .order_by_asc(customer_coupon::Column::Id)
            .find_also_related(coupon::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(claim, coupon)| {
                Ok(ClaimDetail {
                    claim: claim.into(),
                    customer: owner.clone(),
                    coupon: coupon.map(CouponInfo::try_from).transpose()?,
                })
            })
            .collect()
    }
}
