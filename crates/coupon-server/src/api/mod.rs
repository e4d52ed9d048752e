//! HTTP API handlers

pub mod coupon;
pub mod customer;
pub mod health;
pub mod model;
pub mod route;
