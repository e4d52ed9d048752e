//! SeaORM entity definitions for the coupon schema
//!
//! Three tables: `customers`, `coupons` and `customer_coupons` (claims).

pub mod prelude;

pub mod coupon;
pub mod customer;
pub mod customer_coupon;
