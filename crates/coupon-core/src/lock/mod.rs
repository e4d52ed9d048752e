//! Per-coupon mutual exclusion
//!
//! A `LockStore` provides atomic set-if-absent with expiry; the
//! `LockCoordinator` turns it into `acquire`/`release` for the controllers.

mod coordinator;
mod memory;
mod redis_store;
mod store;

pub use coordinator::{DEFAULT_LOCK_TTL, LOCK_SENTINEL, LockCoordinator, coupon_lock_key};
pub use memory::MemoryLockStore;
pub use redis_store::RedisLockStore;
pub use store::LockStore;
