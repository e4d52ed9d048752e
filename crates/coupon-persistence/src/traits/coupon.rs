//! Coupon persistence trait

use async_trait::async_trait;

use crate::model::{CouponInfo, NewCoupon};

/// Coupon catalog operations
#[async_trait]
pub trait CouponPersistence: Send + Sync {
    /// List all coupons
    async fn coupon_find_all(&self) -> anyhow::Result<Vec<CouponInfo>>;

    /// Create a coupon; `remaining` starts at `total_issued`
    async fn coupon_create(&self, coupon: NewCoupon) -> anyhow::Result<CouponInfo>;
}
