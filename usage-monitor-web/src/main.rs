//! Usage Monitor HTTP server
//!
//! Serves the password-gated dashboard and `/api/usage` for every Cloudflare
//! account reachable from the configured API tokens.

mod config;
mod error;
mod handlers;
mod logging;
mod state;
mod views;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Keep the guard alive so buffered file logs are flushed on shutdown
    let _log_guard = logging::init(&config.log)?;

    tracing::info!(
        "Starting Usage Monitor v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );

    let state = web::Data::new(AppState::from_config(&config)?);
    tracing::info!(
        tokens = config.credentials().len(),
        cache_ttl_secs = config.usage.cache_ttl_secs,
        "Usage service initialized"
    );

    let bind = (config.server.host.clone(), config.server.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .workers(config.workers())
    .bind(&bind)
    .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await
    .context("server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}
