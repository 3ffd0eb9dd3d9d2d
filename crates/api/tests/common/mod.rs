#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tidewatch_api::config::{ReadSource, ServerConfig};
use tidewatch_api::router::build_app_router;
use tidewatch_api::state::AppState;
use tidewatch_core::classification::ClassificationPolicy;
use tidewatch_core::labels::Locale;
use tidewatch_core::record::ReadingRange;
use tidewatch_producer::ProducerConfig;
use tidewatch_store::{DurableMedium, SnapshotStore};

/// Build a test `ServerConfig` with baseline bands and a 15-second tick.
pub fn test_config(status_file: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        read_timeout: Duration::from_secs(2),
        read_source: ReadSource::File,
        embedded_producer: true,
        locale: Locale::English,
        policy: ClassificationPolicy::default(),
        producer: ProducerConfig::new(
            Duration::from_secs(15),
            status_file,
            ReadingRange::default(),
        )
        .unwrap(),
    }
}

/// Build the full application router over the given store and medium.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(
    config: ServerConfig,
    store: Arc<SnapshotStore>,
    medium: Arc<dyn DurableMedium>,
) -> Router {
    let state = AppState::new(config.clone(), store, medium);
    build_app_router(state, &config)
}

/// Send a bodiless request with the given method.
pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A temp-dir backed status file plus the store and medium wired to it.
pub struct TestEnv {
    pub dir: tempfile::TempDir,
    pub config: ServerConfig,
    pub store: Arc<SnapshotStore>,
    pub medium: Arc<tidewatch_store::FileMedium>,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let status_file = dir.path().join("status.json");
        Self {
            config: test_config(&status_file),
            medium: Arc::new(tidewatch_store::FileMedium::new(status_file)),
            store: Arc::new(SnapshotStore::new()),
            dir,
        }
    }

    pub fn status_file(&self) -> &Path {
        self.medium.path()
    }

    /// Write `record` to the status file the way the producer does.
    pub async fn write(&self, water: i32, wind: i32) {
        self.medium
            .overwrite_current(&tidewatch_core::record::MeasurementRecord::new(water, wind))
            .await
            .unwrap();
    }

    pub fn app(&self) -> Router {
        build_test_app(
            self.config.clone(),
            Arc::clone(&self.store),
            self.medium.clone(),
        )
    }
}
