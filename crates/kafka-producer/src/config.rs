//! Producer configuration and its mapping onto librdkafka properties.

use crate::error::KafkaProducerError;
use rdkafka::ClientConfig;
use std::time::Duration;

/// librdkafka's upper bound for `message.send.max.retries`.
const UNLIMITED_RETRIES: &str = "2147483647";

/// Broker acknowledgement timeout for a single produce request.
const REQUEST_TIMEOUT_MS: u64 = 4500;

/// Slack added on top of the per-try budget before a record is failed locally.
const MESSAGE_TIMEOUT_MARGIN_MS: u64 = 1000;

/// Settings for the Kafka producer gateway.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Seed brokers
    pub brokers: Vec<String>,
    /// Default topic every record is produced to
    pub topic: String,
    /// Maximum attempts per record, including the first one
    ///
    /// `0` means retry until the record is delivered.
    pub max_tries: u32,
    /// Age after which cached cluster metadata is refreshed
    pub metadata_max_age: Duration,
    /// Client id reported to the brokers
    pub client_id: String,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            brokers: vec!["localhost:9092".to_string()],
            topic: "test-topic".to_string(),
            max_tries: 1,
            metadata_max_age: Duration::from_secs(300),
            client_id: "test-client".to_string(),
        }
    }
}

impl ProducerConfig {
    /// Build the librdkafka client configuration.
    ///
    /// Leader-only acknowledgements, no idempotence, no linger and bounded
    /// local buffering; everything else is left to librdkafka.
    pub fn client_config(&self) -> Result<ClientConfig, KafkaProducerError> {
        let brokers: Vec<&str> = self
            .brokers
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();
        if brokers.is_empty() {
            return Err(KafkaProducerError::InvalidConfig(
                "at least one broker is required".to_string(),
            ));
        }
        if self.topic.trim().is_empty() {
            return Err(KafkaProducerError::InvalidConfig(
                "topic must not be empty".to_string(),
            ));
        }

        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", brokers.join(","))
            .set("client.id", &self.client_id)
            .set(
                "metadata.max.age.ms",
                self.metadata_max_age.as_millis().to_string(),
            )
            .set("acks", "1")
            .set("max.in.flight.requests.per.connection", "10")
            .set("request.timeout.ms", REQUEST_TIMEOUT_MS.to_string())
            .set("batch.size", "1049000")
            .set("queue.buffering.max.messages", "10000")
            .set("linger.ms", "0")
            .set("enable.idempotence", "false");

        if self.max_tries == 0 {
            config
                .set("message.send.max.retries", UNLIMITED_RETRIES)
                .set("message.timeout.ms", "0");
        } else {
            // Retries only count failed requests; without brokers a record
            // would otherwise wait out librdkafka's 300 s default.
            config
                .set(
                    "message.send.max.retries",
                    (self.max_tries - 1).to_string(),
                )
                .set("message.timeout.ms", self.message_timeout_ms().to_string());
        }

        Ok(config)
    }

    /// Local delivery deadline for bounded tries: one request timeout per
    /// try plus a margin, capped at librdkafka's maximum.
    fn message_timeout_ms(&self) -> u64 {
        (u64::from(self.max_tries) * REQUEST_TIMEOUT_MS + MESSAGE_TIMEOUT_MARGIN_MS)
            .min(i32::MAX as u64)
    }
}
