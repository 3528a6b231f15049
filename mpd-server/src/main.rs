//! mpd-server - Market Pulse Dashboard analysis service
//!
//! Stores campaign parameter sets and serves the four derived analyses for
//! each one, generating every analysis once and returning the stored copy
//! afterwards.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mpd_server::config::{Args, DatabaseLocation, ServiceConfig};
use mpd_server::services::text_generator_from_config;
use mpd_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // TOML is read before tracing starts so its log level can apply
    let toml_config = mpd_common::config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = ServiceConfig::resolve(args, toml_config);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "mpd_server={level},mpd_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mpd-server (Market Pulse Dashboard)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let db_pool = match &config.database {
        DatabaseLocation::InMemory => {
            info!("Database: in-memory");
            mpd_common::db::init_memory_pool().await?
        }
        DatabaseLocation::File(path) => {
            info!("Database: {}", path.display());
            mpd_common::db::init_database_pool(path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?
        }
    };
    info!("Database connection established");

    let text_generator = text_generator_from_config(&config.ai)
        .context("Failed to initialize text generation client")?;
    info!(service = text_generator.name(), model = %config.ai.model, "Text generation ready");

    let state = AppState::from_config(db_pool, &config, text_generator);
    let app = mpd_server::build_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
