//! Persistence traits for the storage abstraction layer
//!
//! This module defines the core persistence traits that abstract over the
//! storage backends: external database (MySQL/PostgreSQL) and in-memory tables.

pub mod claim;
pub mod coupon;
pub mod customer;

pub use claim::ClaimPersistence;
pub use coupon::CouponPersistence;
pub use customer::CustomerPersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
///
/// This is the main interface for all storage operations. Controllers receive
/// it as an injected `Arc<dyn PersistenceService>`.
#[async_trait]
pub trait PersistenceService:
    CustomerPersistence + CouponPersistence + ClaimPersistence + Send + Sync
{
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
