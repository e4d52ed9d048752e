use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::model::AppState;

use super::model::{HealthResponse, STATUS_DOWN, STATUS_UP};

/// Liveness of the HTTP layer plus reachability of the persistent store
#[get("/health")]
pub async fn health(data: web::Data<AppState>) -> HttpResponse {
    let storage = data.persistence.storage_mode().to_string();

    match data.persistence.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: STATUS_UP.to_string(),
            storage,
        }),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: STATUS_DOWN.to_string(),
                storage,
            })
        }
    }
}
