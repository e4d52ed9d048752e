//! API routing configuration

use actix_web::{Scope, web};

use super::{coupon, customer, health};

/// Routes:
/// - GET /customer/customers
/// - GET /customer/{customer_id}/coupons
pub fn customer_routes() -> Scope {
    web::scope("/customer")
        .service(customer::list_customers)
        .service(customer::list_customer_coupons)
}

/// Routes:
/// - GET /coupon/coupons
/// - POST /coupon/claim
/// - POST /coupon/coupons/use
pub fn coupon_routes() -> Scope {
    web::scope("/coupon")
        .service(coupon::list_coupons)
        .service(coupon::claim_coupon)
        .service(coupon::use_coupon)
}

/// Register every route plus the JSON extractor error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(crate::error::json_error_handler))
        .service(customer_routes())
        .service(coupon_routes())
        .service(health::health);
}
