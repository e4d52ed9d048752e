//! Coupon Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the customer, coupon and claim tables
//! - Storage-agnostic persistence traits
//! - External database (MySQL/PostgreSQL) and in-memory backends
//! - Schema sync and reference data seeding

pub mod entity;
pub mod memory;
pub mod model;
pub mod seed;
pub mod sql;
pub mod traits;

pub use memory::MemoryPersistService;
pub use model::*;
pub use seed::seed_if_empty;
pub use sql::ExternalDbPersistService;
pub use sql::schema::sync_schema;
pub use traits::*;

// Re-export sea_orm for consumers that build connections
pub use sea_orm;
