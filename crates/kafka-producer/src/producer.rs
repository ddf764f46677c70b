//! rdkafka-backed producer gateway.

use crate::config::ProducerConfig;
use crate::context::{client_log_level, TracingContext};
use crate::error::KafkaProducerError;
use bytes::Bytes;
use producer_gateway::{Delivery, ProduceError, ProduceGateway, ProduceResult};
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Kafka producer shared by all workers.
///
/// Cloning is cheap; clones share the same underlying librdkafka handle.
#[derive(Clone)]
pub struct KafkaProducer {
    producer: FutureProducer<TracingContext>,
    topic: String,
}

impl KafkaProducer {
    /// Create a producer bound to the configured brokers and default topic.
    ///
    /// No connection is made here; librdkafka connects lazily. Client
    /// diagnostics go to `tracing` under the `librdkafka` target, at the
    /// verbosity the installed subscriber records for it.
    pub fn new(config: &ProducerConfig) -> Result<Self, KafkaProducerError> {
        let producer: FutureProducer<TracingContext> = config
            .client_config()?
            .set_log_level(client_log_level())
            .create_with_context(TracingContext)?;

        info!(
            "Created Kafka producer for topic '{}' (brokers: {}, max tries: {})",
            config.topic,
            config.brokers.join(","),
            config.max_tries
        );

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }

    /// Ask the cluster for topic metadata in the background.
    ///
    /// The request warms librdkafka's metadata cache before the first batch.
    /// It is detached: the outcome is only logged, and a request still
    /// pending at exit ends with the runtime.
    pub fn spawn_metadata_refresh(&self, timeout: Duration) {
        let producer = self.producer.clone();
        let topic = self.topic.clone();

        tokio::task::spawn_blocking(move || {
            match producer.client().fetch_metadata(Some(topic.as_str()), timeout) {
                Ok(metadata) => {
                    for t in metadata.topics() {
                        match t.error() {
                            Some(err) => warn!("Metadata for topic '{}' has error: {err:?}", t.name()),
                            None => info!(
                                "Topic '{}' has {} partitions",
                                t.name(),
                                t.partitions().len()
                            ),
                        }
                    }
                }
                Err(e) => warn!("Failed to refresh metadata for topic '{topic}': {e}"),
            }
        });
    }

    /// Wait for queued records to be delivered.
    ///
    /// Blocks the calling thread for up to `timeout`.
    pub fn flush(&self, timeout: Duration) -> Result<(), KafkaProducerError> {
        self.producer.flush(timeout)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProduceGateway for KafkaProducer {
    async fn produce_batch(&self, payloads: &[Bytes]) -> Vec<ProduceResult> {
        if payloads.is_empty() {
            return Vec::new();
        }

        // Enqueue every record, then wait for all delivery reports. Waiting
        // on a full local queue is left to librdkafka.
        let deliveries = payloads.iter().map(|payload| {
            let record = FutureRecord::<(), [u8]>::to(&self.topic).payload(payload.as_ref());
            self.producer.send(record, Timeout::Never)
        });

        let results: Vec<ProduceResult> = futures::future::join_all(deliveries)
            .await
            .into_iter()
            .map(|result| match result {
                Ok((partition, offset)) => Ok(Delivery { partition, offset }),
                Err((err, _)) => Err(classify_error(&err)),
            })
            .collect();

        debug!(
            "Produced batch of {} records to '{}'",
            results.len(),
            self.topic
        );
        results
    }
}

/// Map an rdkafka delivery error onto the gateway's failure kinds.
pub fn classify_error(err: &KafkaError) -> ProduceError {
    match err {
        KafkaError::MessageProduction(
            RDKafkaErrorCode::MessageTimedOut | RDKafkaErrorCode::RequestTimedOut,
        ) => ProduceError::TimedOut(err.to_string()),
        KafkaError::MessageProduction(
            RDKafkaErrorCode::BrokerTransportFailure
            | RDKafkaErrorCode::AllBrokersDown
            | RDKafkaErrorCode::NetworkException,
        ) => ProduceError::Transport(err.to_string()),
        KafkaError::MessageProduction(_) => ProduceError::Rejected(err.to_string()),
        _ => ProduceError::Transport(err.to_string()),
    }
}
