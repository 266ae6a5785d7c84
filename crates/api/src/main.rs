use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use promptdir_db::store::{MemoryStore, PgStore, PromptStore};
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptdir_api::config::ServerConfig;
use promptdir_api::router::build_app_router;
use promptdir_api::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptdir_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let store = connect_store(&config).await?;

    // --- Router ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open connections get `shutdown_timeout_secs` to finish once a signal
    // arrives; after that the server is dropped.
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    let signalled = Arc::new(Notify::new());
    let notifier = Arc::clone(&signalled);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notifier.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            signalled.notified().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(drain_secs = config.shutdown_timeout_secs, "Drain window elapsed, closing remaining connections");
        }
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Connect to PostgreSQL when `DATABASE_URL` is set, otherwise fall back to
/// the in-memory store.
async fn connect_store(config: &ServerConfig) -> Result<Arc<dyn PromptStore>, BoxError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, prompts are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = promptdir_db::create_pool(database_url, config.db_max_connections).await?;
    tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

    promptdir_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    promptdir_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgStore::new(pool)))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
