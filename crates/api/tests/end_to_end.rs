//! End-to-end: producer writes the status file, the server reads it.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, TestEnv};
use tidewatch_core::classification::ClassificationPolicy;
use tidewatch_core::generator::RandomGenerator;
use tidewatch_core::record::{MeasurementRecord, ReadingRange};
use tidewatch_producer::{Producer, ProducerConfig};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn producer_output_is_served_and_classified() {
    let mut env = TestEnv::new();
    env.config.producer = ProducerConfig::new(
        Duration::from_millis(50),
        env.status_file(),
        ReadingRange::default(),
    )
    .unwrap();

    let response = get(env.app(), "/api/v1/status").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let producer = Producer::new(
        &env.config.producer,
        Arc::clone(&env.store),
        env.medium.clone(),
        Box::new(RandomGenerator::default()),
    );
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(producer.run(cancel.clone()));

    // Wait until a couple of ticks have landed.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let policy = ClassificationPolicy::default();
    for _ in 0..5 {
        let response = get(env.app(), "/api/v1/status").await;
        assert_eq!(response.status(), StatusCode::OK);

        let data = body_json(response).await["data"].clone();
        let water = data["water"].as_i64().unwrap() as i32;
        let wind = data["wind"].as_i64().unwrap() as i32;
        assert!((1..=100).contains(&water));
        assert!((1..=100).contains(&wind));

        let expected = policy.classify(&MeasurementRecord::new(water, wind));
        assert_eq!(data["status_water"], expected.water.as_str());
        assert_eq!(data["status_wind"], expected.wind.as_str());

        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    assert!(env.store.read().await.unwrap().sequence >= 2);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}
