//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use coupon_core::{ClaimController, LockCoordinator, LockStore, RedemptionController};
use coupon_persistence::PersistenceService;

use super::config::Configuration;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub configuration: Configuration,
    pub persistence: Arc<dyn PersistenceService>,
    pub claim_controller: ClaimController,
    pub redemption_controller: RedemptionController,
}

impl AppState {
    /// Build the controllers over the given stores
    pub fn new(
        configuration: Configuration,
        persistence: Arc<dyn PersistenceService>,
        lock_store: Arc<dyn LockStore>,
    ) -> Self {
        let lock_ttl: Duration = configuration.lock_ttl();
        let claim_controller =
            ClaimController::new(persistence.clone(), LockCoordinator::new(lock_store))
                .with_lock_ttl(lock_ttl);
        let redemption_controller = RedemptionController::new(persistence.clone());

        Self {
            configuration,
            persistence,
            claim_controller,
            redemption_controller,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("storage_mode", &self.persistence.storage_mode())
            .field("lock_ttl", &self.claim_controller.lock_ttl())
            .finish()
    }
}
