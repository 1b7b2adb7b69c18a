//! depot-server entry point.
//!
//! Loads configuration, installs logging, opens the database and serves
//! the REST API until interrupted.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use depot_server::config::Config;
use depot_server::error::{Error, Result};
use depot_server::repository::init_db;
use depot_server::{app, AppState};

/// REST backend for the depot maintenance dashboard
#[derive(Debug, Parser)]
#[command(name = "depot-server", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("depot-server: {e}");
            rolling_logger::error(&format!("startup failed: {e}"));
            rolling_logger::flush();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref())?;

    rolling_logger::init_logger_with(&config.logging.dir, "depot-server", config.logger_options())?;
    tracing::info!("configuration loaded, database at {}", config.storage.database_path.display());

    let db = init_db(&config.storage.database_path).map_err(|source| Error::DatabaseOpen {
        path: config.storage.database_path.clone(),
        source,
    })?;

    let router = app(AppState::new(db), &config.server.allowed_origins);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("depot server listening on {}", config.server.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("depot server stopped");
    rolling_logger::flush();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        rolling_logger::warn(&format!("failed to listen for ctrl-c: {e}"));
    }
}
