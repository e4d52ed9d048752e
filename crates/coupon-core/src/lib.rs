//! Coupon Core - Inventory coordination
//!
//! This crate provides:
//! - Lock stores (Redis and in-memory) and the lock coordinator
//! - The inventory claim controller
//! - The redemption controller

pub mod lock;
pub mod service;

pub use lock::{LockCoordinator, LockStore, MemoryLockStore, RedisLockStore};
pub use service::{ClaimController, RedemptionController};
