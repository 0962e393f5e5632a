//! Backend entry-point: wires configuration, migrations, persistence, and the
//! HTTP server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::TokenSigner;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselExpenseRepository, DieselUserRepository, PoolConfig,
};
use backend::server::build_app;
use backend::server::config::AppConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply outstanding migrations over a dedicated synchronous connection.
fn run_migrations(database_url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(&config.database_url).map_err(std::io::Error::other)?;

    let tokens = TokenSigner::new(&config.token_secret).map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselExpenseRepository::new(pool)),
        tokens,
    ));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_state = state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "listening");
    server.run().await
}
