//! Request and response payloads

use serde::{Deserialize, Serialize};

/// Body of the claim and use endpoints
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CouponRequestParam {
    pub customer_id: String,
    pub coupon_id: String,
}

/// Health endpoint body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
}

pub const STATUS_UP: &str = "UP";
pub const STATUS_DOWN: &str = "DOWN";

pub const CLAIM_SUCCESS_MESSAGE: &str = "coupon claimed successfully";
pub const USE_SUCCESS_MESSAGE: &str = "coupon redeemed successfully";
