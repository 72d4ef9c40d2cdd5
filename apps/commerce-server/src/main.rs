//! commerce-server - hosts the commerce service over HTTP
//!
//! Startup: load configuration, install logging, connect to the database,
//! run migrations, then serve the REST API until Ctrl-C.

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use commerce_service::CommerceServiceModule;
use config::AppConfig;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Debug, Parser)]
#[command(name = "commerce-server", version, about = "Catalog and order management server")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    logging::init(&cfg.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting commerce-server");

    // every pooled connection to `sqlite::memory:` would open its own database
    let max_connections = if cfg.database.url.contains(":memory:") {
        1
    } else {
        cfg.database.max_connections
    };
    let mut options = ConnectOptions::new(cfg.database.url.clone());
    options
        .max_connections(max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.database.url))?;

    CommerceServiceModule::migrate(&db, &cfg.commerce).await?;
    if cli.migrate_only {
        tracing::info!("Migrations applied, exiting");
        return Ok(());
    }

    let module = CommerceServiceModule::init(db, cfg.commerce.clone());
    let app = module
        .register_rest(axum::Router::new())
        .layer(TimeoutLayer::new(cfg.server.request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!("commerce-server HTTP listening on {}", cfg.server.bind_addr);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => tracing::error!("failed to listen for shutdown signal: {e}"),
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("HTTP server error")?;

    tracing::info!("commerce-server stopped");
    Ok(())
}
