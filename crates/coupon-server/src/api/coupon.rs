//! Coupon API handlers
//!
//! - GET /coupon/coupons - List all coupons
//! - POST /coupon/claim - Claim one unit of a coupon
//! - POST /coupon/coupons/use - Redeem a claimed coupon

use actix_web::{HttpResponse, get, post, web};
use tracing::error;

use coupon_common::CouponError;
use coupon_persistence::{ClaimInfo, CouponPersistence};

use crate::{
    error::AppError,
    model::{AppState, MessageResult},
};

use super::model::{CLAIM_SUCCESS_MESSAGE, CouponRequestParam, USE_SUCCESS_MESSAGE};

#[get("/coupons")]
pub async fn list_coupons(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let coupons = data.persistence.coupon_find_all().await.map_err(|e| {
        error!(error = %e, "Failed to list coupons");
        CouponError::database(e)
    })?;

    Ok(HttpResponse::Ok().json(coupons))
}

#[post("/claim")]
pub async fn claim_coupon(
    data: web::Data<AppState>,
    params: web::Json<CouponRequestParam>,
) -> Result<HttpResponse, AppError> {
    let claim = data
        .claim_controller
        .claim(&params.customer_id, &params.coupon_id)
        .await?;

    Ok(MessageResult::<ClaimInfo>::http_success(
        CLAIM_SUCCESS_MESSAGE,
        claim,
    ))
}

#[post("/coupons/use")]
pub async fn use_coupon(
    data: web::Data<AppState>,
    params: web::Json<CouponRequestParam>,
) -> Result<HttpResponse, AppError> {
    let claim = data
        .redemption_controller
        .redeem(&params.customer_id, &params.coupon_id)
        .await?;

    Ok(MessageResult::<ClaimInfo>::http_success(
        USE_SUCCESS_MESSAGE,
        claim,
    ))
}
