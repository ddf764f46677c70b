//! Command-line configuration.

mod duration;

pub use duration::parse_duration;

use crate::pool::PoolConfig;
use clap::Parser;
use loadgen_kafka_producer::ProducerConfig;
use std::time::Duration;

/// Synthetic Kafka load generator.
///
/// Runs a pool of workers that each produce a randomized batch of keyless
/// records every `--worker-period` until SIGINT or SIGTERM is received.
#[derive(Parser, Clone, Debug)]
#[command(name = "kafka-loadgen")]
#[command(about = "Produce randomized message batches to Kafka from a pool of workers")]
pub struct LoadgenArgs {
    /// Default topic to publish to
    #[arg(long, env = "LOADGEN_TOPIC", default_value = "test-topic")]
    pub topic: String,

    /// Kafka brokers (comma-separated)
    #[arg(
        long,
        env = "KAFKA_BROKERS",
        value_delimiter = ',',
        default_value = "localhost:19092,localhost:29092,localhost:39092"
    )]
    pub brokers: Vec<String>,

    /// Maximum attempts per record (0 for unlimited)
    #[arg(long, env = "LOADGEN_TRIES", default_value = "1")]
    pub tries: u32,

    /// Maximum age of cached cluster metadata (e.g. "5m")
    #[arg(long, env = "LOADGEN_METADATA_MAX_AGE", default_value = "5m", value_parser = parse_duration)]
    pub metadata_max_age: Duration,

    /// Number of workers
    #[arg(long, env = "LOADGEN_WORKER_COUNT", default_value = "10")]
    pub worker_count: usize,

    /// How often each worker produces a message batch (e.g. "1s", "100ms")
    #[arg(long, env = "LOADGEN_WORKER_PERIOD", default_value = "1s", value_parser = parse_duration)]
    pub worker_period: Duration,
}

impl LoadgenArgs {
    /// Validated worker pool settings.
    pub fn pool_config(&self) -> anyhow::Result<PoolConfig> {
        PoolConfig::new(self.worker_count, self.worker_period)
    }

    /// Settings for the Kafka producer gateway.
    pub fn producer_config(&self) -> ProducerConfig {
        ProducerConfig {
            brokers: self.brokers.clone(),
            topic: self.topic.clone(),
            max_tries: self.tries,
            metadata_max_age: self.metadata_max_age,
            ..Default::default()
        }
    }
}
