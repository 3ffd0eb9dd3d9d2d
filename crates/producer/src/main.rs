//! `tidewatch-producer` -- standalone measurement producer.
//!
//! Runs only the producer loop, writing the durable status record that a
//! separately deployed `tidewatch-api` (with `EMBEDDED_PRODUCER=false`)
//! reads. The two processes share nothing but the status file.
//!
//! See [`ProducerConfig::from_env`] for the environment variables.

use std::sync::Arc;

use tidewatch_core::generator::RandomGenerator;
use tidewatch_producer::{Producer, ProducerConfig};
use tidewatch_store::{FileMedium, SnapshotStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidewatch_producer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProducerConfig::from_env();

    tracing::info!(
        status_file = %config.status_file.display(),
        interval_secs = config.tick_interval.as_secs(),
        range = %config.range,
        "Starting tidewatch-producer",
    );

    let store = Arc::new(SnapshotStore::new());
    let medium = Arc::new(FileMedium::new(config.status_file.clone()));
    let producer = Producer::new(
        &config,
        store,
        medium,
        Box::new(RandomGenerator::new(config.range)),
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received SIGINT (Ctrl-C), stopping producer");
                signal_cancel.cancel();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl-C handler"),
        }
    });

    producer.run(cancel).await;

    tracing::info!("Producer stopped");
}
