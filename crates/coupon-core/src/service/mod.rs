//! Stateful coupon operations
//!
//! Both controllers take their stores as constructor arguments.

mod claim;
mod redemption;

pub use claim::ClaimController;
pub use redemption::RedemptionController;
