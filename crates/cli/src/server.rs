//! # CLI Server
//!
//! Server startup for the Velvet CLI.

use anyhow::anyhow;
use error::Result;
use migration::{Migrator, MigratorTrait as _};
use server::{create_app_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{parse_socket_addr, AppConfig},
    ServeArgs,
};

/// Starts the API server
///
/// Connects to the database, runs pending migrations, then serves the API
/// router until the process is stopped.
pub async fn serve(config: &AppConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", environment = %config.environment, "Starting API server...");

    let database_url = config.database.url();

    info!(
        target: "serve",
        host = %config.database.host,
        port = %config.database.port,
        database = %config.database.database,
        "Connecting to database..."
    );
    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
    info!(target: "serve", "Database migrations completed successfully");

    let state = AppState::new(db, config.token_config());
    let app = create_app_router(state);

    let address = parse_socket_addr(&args.host, args.port)?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("Server error: {}", e))?;

    Ok(())
}
