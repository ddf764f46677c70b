//! Error types for the Kafka producer gateway.

use thiserror::Error;

/// Errors raised while building or tearing down the producer.
///
/// Per-record delivery failures are not represented here; they are reported
/// as `producer_gateway::ProduceError` values inside the batch results.
#[derive(Error, Debug)]
pub enum KafkaProducerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
