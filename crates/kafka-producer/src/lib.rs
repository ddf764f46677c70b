//! Kafka producer gateway for kafka-loadgen.
//!
//! This library wraps an rdkafka `FutureProducer` behind the
//! `producer_gateway::ProduceGateway` trait. Delivery concerns (partitioning,
//! retries, acknowledgements, batching and linger) stay inside librdkafka;
//! this crate only maps payload batches to keyless records and delivery
//! reports back to positional `ProduceResult`s.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use loadgen_kafka_producer::{KafkaProducer, ProducerConfig};
//! use producer_gateway::ProduceGateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ProducerConfig {
//!         brokers: vec!["localhost:9092".to_string()],
//!         topic: "test-topic".to_string(),
//!         ..Default::default()
//!     };
//!     let producer = KafkaProducer::new(&config)?;
//!
//!     let payloads = vec![bytes::Bytes::from_static(b"hello")];
//!     for result in producer.produce_batch(&payloads).await {
//!         println!("{result:?}");
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod error;
mod producer;

pub use config::ProducerConfig;
pub use context::{TracingContext, LOG_TARGET};
pub use error::KafkaProducerError;
pub use producer::{classify_error, KafkaProducer};
