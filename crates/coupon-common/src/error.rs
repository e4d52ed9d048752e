//! Error types and error codes for the coupon service
//!
//! This module defines:
//! - `CouponError`: Business and infrastructure error enum surfaced to callers
//! - `ErrorCode`: Structured error codes for API responses

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Coupon service error taxonomy
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// Missing, empty or malformed request fields
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Per-coupon lock could not be taken; callers retry with backoff
    #[error("coupon system is busy, please retry later")]
    Busy,

    /// No stock left, or the coupon does not exist
    #[error("coupon has been fully claimed")]
    SoldOut,

    /// No unused claim exists for the customer and coupon
    #[error("coupon is not redeemable, it may be used or never claimed")]
    NotRedeemable,

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl CouponError {
    /// Error code reported alongside this error in API responses
    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            CouponError::InvalidRequest(_) => PARAMETER_VALIDATE_ERROR,
            CouponError::Busy => COUPON_BUSY,
            CouponError::SoldOut => COUPON_SOLD_OUT,
            CouponError::NotRedeemable => COUPON_NOT_REDEEMABLE,
            CouponError::DatabaseError(_) => DATA_ACCESS_ERROR,
            CouponError::InternalError(_) => SERVER_ERROR,
        }
    }

    /// Wrap a storage-layer failure
    pub fn database(err: impl Display) -> Self {
        CouponError::DatabaseError(err.to_string())
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

// Coupon inventory error codes
pub const COUPON_BUSY: ErrorCode<'static> = ErrorCode {
    code: 40001,
    message: "coupon busy",
};

pub const COUPON_SOLD_OUT: ErrorCode<'static> = ErrorCode {
    code: 40002,
    message: "coupon sold out",
};

pub const COUPON_NOT_REDEEMABLE: ErrorCode<'static> = ErrorCode {
    code: 40003,
    message: "coupon not redeemable",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_error_display() {
        let err = CouponError::InvalidRequest("customer_id is empty".to_string());
        assert_eq!(format!("{}", err), "invalid request: customer_id is empty");

        let err = CouponError::DatabaseError("connection refused".to_string());
        assert_eq!(format!("{}", err), "database error: connection refused");
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(CouponError::Busy.error_code(), COUPON_BUSY);
        assert_eq!(CouponError::SoldOut.error_code(), COUPON_SOLD_OUT);
        assert_eq!(CouponError::NotRedeemable.error_code(), COUPON_NOT_REDEEMABLE);
        assert_eq!(
            CouponError::InvalidRequest(String::new()).error_code(),
            PARAMETER_VALIDATE_ERROR
        );
        assert_eq!(
            CouponError::database("boom").error_code(),
            DATA_ACCESS_ERROR
        );
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(PARAMETER_VALIDATE_ERROR.code, 20002);
        assert_eq!(COUPON_BUSY.code, 40001);
        assert_eq!(COUPON_SOLD_OUT.code, 40002);
        assert_eq!(COUPON_NOT_REDEEMABLE.code, 40003);
    }
}
