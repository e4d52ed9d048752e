//! Customer API handlers
//!
//! - GET /customer/customers - List all customers
//! - GET /customer/{customer_id}/coupons - List a customer's claims

use actix_web::{HttpResponse, get, web};
use tracing::error;

use coupon_common::CouponError;
use coupon_persistence::{ClaimPersistence, CustomerPersistence};

use crate::{error::AppError, model::AppState};

#[get("/customers")]
pub async fn list_customers(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let customers = data.persistence.customer_find_all().await.map_err(|e| {
        error!(error = %e, "Failed to list customers");
        CouponError::database(e)
    })?;

    Ok(HttpResponse::Ok().json(customers))
}

/// Claims of one customer joined with customer and coupon details
#[get("/{customer_id}/coupons")]
pub async fn list_customer_coupons(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let claims = data
        .persistence
        .claim_find_by_customer(customer_id.trim())
        .await
        .map_err(|e| {
            error!(customer_id = %customer_id, error = %e, "Failed to list customer coupons");
            CouponError::database(e)
        })?;

    Ok(HttpResponse::Ok().json(claims))
}
