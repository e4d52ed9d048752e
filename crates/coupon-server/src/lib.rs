//! Coupon Server - HTTP surface of the coupon inventory service
//!
//! This crate wires the claim and redemption controllers into an actix-web
//! application, together with configuration, logging and lifecycle handling.

pub mod api;
pub mod error;
pub mod middleware;
pub mod model;
pub mod startup;

pub use error::AppError;
pub use model::{AppState, Configuration};
