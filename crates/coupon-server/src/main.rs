//! Main entry point for the coupon server.

use std::sync::Arc;

use coupon_server::{
    model::{AppState, Configuration},
    startup::{self, GracefulShutdown},
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new()?;

    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let persistence = startup::init_persistence(&configuration).await?;
    let lock_store = startup::init_lock_store(&configuration).await?;

    let server_address = configuration.server_address();
    let server_port = configuration.server_port();
    let shutdown_timeout = configuration.shutdown_timeout();

    let app_state = Arc::new(AppState::new(configuration, persistence, lock_store));

    let shutdown_signal = startup::wait_for_shutdown_signal();
    let graceful_shutdown = GracefulShutdown::new(shutdown_signal, shutdown_timeout);

    info!(
        "Starting coupon server on {}:{}",
        server_address, server_port
    );
    let server = startup::main_server(app_state, server_address, server_port)?;
    let handle = server.handle();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
            }
        }
        _ = graceful_shutdown.stop_on_signal(handle) => {
            info!("HTTP server shut down gracefully");
        }
    }

    info!("Coupon server shutdown complete");
    Ok(())
}
