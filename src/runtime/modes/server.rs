//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::services::{
    AppStartTime, abbreviation_routes, health_routes, json_config, query_config,
};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(allowed_origins: &[String]) {
    if allowed_origins.is_empty() {
        warn!(
            "api.cors_allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    // Empty origins = same-origin only
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .allowed_header(actix_web::http::header::AUTHORIZATION)
        .allowed_header(actix_web::http::header::ACCEPT)
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let config = crate::config::get_config();
    let service = startup.service.clone();
    let admin_auth = startup.admin_auth.clone();
    let api_prefix = config.server.api_prefix.clone();
    let allowed_origins = config.api.cors_allowed_origins.clone();

    validate_cors_config(&allowed_origins);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors_middleware(&allowed_origins))
            .wrap(Compress::default())
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(
                web::scope(&api_prefix)
                    .service(abbreviation_routes().wrap(admin_auth.clone()))
                    .service(health_routes()),
            )
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
