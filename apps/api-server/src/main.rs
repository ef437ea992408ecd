//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        env = %config.env,
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    if config.is_production() && config.database.url.is_none() {
        tracing::warn!("Production without DATABASE_URL: posts will not survive a restart");
    }

    // An unreachable database is fatal here
    let state = AppState::new(&config).await?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .client_request_timeout(config.read_timeout)
    .client_disconnect_timeout(config.write_timeout)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
