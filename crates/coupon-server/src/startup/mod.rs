//! Application startup utilities module.

mod bootstrap;
mod http;
pub mod logging;
mod shutdown;

pub use bootstrap::{init_lock_store, init_persistence};
pub use http::main_server;
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
pub use shutdown::{GracefulShutdown, ShutdownSignal, wait_for_shutdown_signal};
