//! # Velvet CLI
//!
//! Command-line interface for the Velvet membership platform.
//!
//! ## Usage
//!
//! ```bash
//! velvet serve    # Start the API server (runs migrations automatically)
//! velvet migrate  # Run database migrations
//! velvet --help   # Show help
//! ```

use clap::{Args, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait as _;
use tracing::info;

mod config;
mod server;

use config::AppConfig;

/// Velvet - VIP membership content platform
#[derive(Parser, Debug)]
#[command(name = "velvet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty)
    #[arg(short, long, env = "VELVET_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "VELVET_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "VELVET_PORT", default_value = "3000")]
    pub port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration instead of applying pending ones
    #[arg(long)]
    rollback: bool,
}

fn init_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if format == "json" {
        builder.json().init();
    }
    else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; real environments set variables directly
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level, &cli.log_format);

    info!(target: "app", command = ?cli.command, "Velvet CLI starting...");

    let app_config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve(args) => server::serve(&app_config, &args).await?,
        Commands::Migrate(args) => migrate(&app_config, &args).await?,
    }

    Ok(())
}

async fn migrate(config: &AppConfig, args: &MigrateArgs) -> Result<()> {
    let db = migration::connect_to_database(&config.database.url()).await?;

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db, Some(1)).await?;
        info!(target: "migrate", "Rollback completed successfully");
    }
    else {
        info!(target: "migrate", "Running database migrations...");
        migration::Migrator::up(&db, None).await?;
        info!(target: "migrate", "Migrations completed successfully");
    }

    Ok(())
}
