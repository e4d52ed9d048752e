//! Coupon Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all coupon service components:
//! - Error types and error codes
//! - Identifier validation

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::{CouponError, ErrorCode};
pub use utils::{is_valid_id, validate_id};
