//! Command-line interface for kafka-loadgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten workers, one batch per second each, against a local three-broker cluster
//! kafka-loadgen
//!
//! # Faster ticks with unlimited retries
//! kafka-loadgen --brokers localhost:9092 --topic bench \
//!   --worker-count 32 --worker-period 100ms --tries 0
//! ```
//!
//! Stop with Ctrl+C or SIGTERM; workers finish their in-flight batch first.

use anyhow::Context;
use clap::Parser;
use kafka_loadgen::{LoadgenArgs, ShutdownSignal, SignalListener, WorkerPool};
use loadgen_kafka_producer::KafkaProducer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How long to wait for the initial metadata request.
const METADATA_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to wait for queued records after the workers have stopped.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kafka_loadgen=info,loadgen_kafka_producer=info,librdkafka=info".into()
            }),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = LoadgenArgs::parse();
    let pool_config = args.pool_config()?;

    let producer =
        KafkaProducer::new(&args.producer_config()).context("Failed to create Kafka producer")?;
    producer.spawn_metadata_refresh(METADATA_REFRESH_TIMEOUT);

    let shutdown = ShutdownSignal::new();
    let listener = SignalListener::install().context("Failed to install signal handlers")?;
    let listener_task = listener.spawn(shutdown.clone());

    info!("Waiting for SIGINT or SIGTERM to stop");

    let gateway = Arc::new(producer);
    let pool = WorkerPool::new(pool_config, Arc::clone(&gateway));
    let report = pool.run(shutdown.clone()).await;

    // The pool only returns after shutdown, so the listener is already done.
    let _ = listener_task.await;

    let flushed = tokio::task::spawn_blocking(move || gateway.flush(FLUSH_TIMEOUT))
        .await
        .context("Flush task failed")?;
    if let Err(e) = flushed {
        warn!("Failed to flush pending records: {e}");
    }

    info!("Load generation finished: {report}");
    Ok(())
}
