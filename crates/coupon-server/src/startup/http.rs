//! HTTP server setup

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{api::route, middleware::RequestTracing, model::AppState};

/// Creates and binds the main HTTP server
pub fn main_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(RequestTracing::new())
            .app_data(web::Data::from(app_state.clone()))
            .configure(route::configure)
    })
    .bind((address, port))?
    .disable_signals()
    .run())
}
