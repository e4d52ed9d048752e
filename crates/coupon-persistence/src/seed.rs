//! Reference data loaded on first start

use chrono::{Months, Utc};
use rust_decimal::Decimal;

use crate::model::{DiscountKind, NewCoupon};
use crate::traits::{CouponPersistence, CustomerPersistence, PersistenceService};

/// Units issued for each seeded coupon
pub const SEED_COUPON_STOCK: i32 = 5;

pub const SEED_CUSTOMERS: [&str; 2] = ["王小龜", "周星星"];

/// Insert the default customers and coupons when no customer exists yet
///
/// Returns `true` when data was inserted.
pub async fn seed_if_empty(persistence: &dyn PersistenceService) -> anyhow::Result<bool> {
    if persistence.customer_count().await? > 0 {
        tracing::debug!("reference data present, skipping seed");
        return Ok(false);
    }

    for name in SEED_CUSTOMERS {
        persistence.customer_create(name).await?;
    }

    let expires_at = Utc::now()
        .checked_add_months(Months::new(1))
        .ok_or_else(|| anyhow::anyhow!("coupon expiry out of range"))?;

    let coupons = [
        NewCoupon {
            name: "25% Discount".to_string(),
            discount_type: DiscountKind::Percentage,
            discount_value: Decimal::new(2500, 2),
            total_issued: SEED_COUPON_STOCK,
            expires_at,
        },
        NewCoupon {
            name: "NT$500 Cashback".to_string(),
            discount_type: DiscountKind::Price,
            discount_value: Decimal::new(50000, 2),
            total_issued: SEED_COUPON_STOCK,
            expires_at,
        },
    ];
    for coupon in coupons {
        persistence.coupon_create(coupon).await?;
    }

    tracing::info!(
        customers = SEED_CUSTOMERS.len(),
        coupons = 2,
        "seeded reference data"
    );
    Ok(true)
}
