use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tidewatch_core::generator::RandomGenerator;
use tidewatch_producer::Producer;
use tidewatch_store::{DurableMedium, FileMedium, SnapshotStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tidewatch_api::config::ServerConfig;
use tidewatch_api::router::build_app_router;
use tidewatch_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tidewatch_api=info,tidewatch_producer=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        status_file = %config.producer.status_file.display(),
        read_source = ?config.read_source,
        embedded_producer = config.embedded_producer,
        locale = %config.locale,
        water_bands = %config.policy.water,
        wind_bands = %config.policy.wind,
        "Loaded server configuration"
    );

    // --- Snapshot store + durable medium ---
    let store = Arc::new(SnapshotStore::new());
    let medium: Arc<dyn DurableMedium> =
        Arc::new(FileMedium::new(config.producer.status_file.clone()));

    // --- Producer ---
    let producer_cancel = CancellationToken::new();
    let producer_handle = if config.embedded_producer {
        let producer = Producer::new(
            &config.producer,
            Arc::clone(&store),
            Arc::clone(&medium),
            Box::new(RandomGenerator::new(config.producer.range)),
        );
        Some(tokio::spawn(producer.run(producer_cancel.clone())))
    } else {
        tracing::info!("Embedded producer disabled; reading records written by an external producer");
        None
    };

    // --- App state + router ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(config.clone(), store, medium);
    let app = build_app_router(state, &config);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    producer_cancel.cancel();
    if let Some(handle) = producer_handle {
        if tokio::time::timeout(shutdown_timeout, handle).await.is_err() {
            tracing::warn!("Producer did not stop within the shutdown timeout");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
