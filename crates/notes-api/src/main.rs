//! Note-taking CRUD API
//!
//! Provides:
//! - Create, list, fetch, update and delete of notes
//! - Filtering notes by tag
//! - Shared-secret API key check on every route

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_api::{AppState, Config, NoteService, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "notes-api")]
#[command(about = "Note-taking CRUD API with tag filtering")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 3000, env = "NOTES_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "NOTES_BIND")]
    bind: String,

    /// Path to config directory
    #[arg(long, default_value = "./config", env = "NOTES_CONFIG_PATH")]
    config_path: PathBuf,

    /// Shared secret clients must send (overrides config.json)
    #[arg(long, env = "X_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Header carrying the API key (overrides config.json)
    #[arg(long, env = "NOTES_API_KEY_HEADER")]
    api_key_header: Option<String>,

    /// Note store: `memory` or a path to a JSON file (overrides config.json)
    #[arg(long, env = "NOTES_STORE")]
    store: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values in .env feed the `env =` fallbacks below and RUST_LOG
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration, then let flags and env win
    let mut config = Config::load(&cli.config_path)?;
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if let Some(header) = cli.api_key_header {
        config.api_key_header = header;
    }
    if let Some(store) = cli.store.as_deref() {
        config.store = StoreConfig::from_arg(store);
    }

    let guard = config.access_guard()?;
    tracing::info!("API key header: {}", guard.header());
    let store = config.store.open()?;

    let state = Arc::new(AppState {
        guard,
        notes: NoteService::new(store),
    });
    let app = notes_api::router(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;

    tracing::info!("Starting notes-api on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("notes-api shut down");
    Ok(())
}

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
