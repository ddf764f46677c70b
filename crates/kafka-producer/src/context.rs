//! Routes librdkafka client diagnostics into `tracing`.

use rdkafka::client::ClientContext;
use rdkafka::config::RDKafkaLogLevel;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use tracing::{debug, error, info, warn, Level};

/// Target used for every event emitted on behalf of librdkafka.
pub const LOG_TARGET: &str = "librdkafka";

/// Client context forwarding librdkafka logs and error events to `tracing`.
///
/// Error events (broker down, transport failures) always arrive through
/// the producer's event loop. Log lines are forwarded whenever librdkafka
/// hands them to the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingContext;

impl ClientContext for TracingContext {
    fn log(&self, level: RDKafkaLogLevel, fac: &str, log_message: &str) {
        let level = tracing_level(level);
        if level == Level::ERROR {
            error!(target: LOG_TARGET, facility = fac, "{log_message}");
        } else if level == Level::WARN {
            warn!(target: LOG_TARGET, facility = fac, "{log_message}");
        } else if level == Level::INFO {
            info!(target: LOG_TARGET, facility = fac, "{log_message}");
        } else {
            debug!(target: LOG_TARGET, facility = fac, "{log_message}");
        }
    }

    fn error(&self, error: KafkaError, reason: &str) {
        match error.rdkafka_error_code() {
            // Transient while brokers come and go; librdkafka reconnects.
            Some(code) if is_transient(code) => {
                warn!(target: LOG_TARGET, "{error}: {reason}")
            }
            _ => error!(target: LOG_TARGET, "{error}: {reason}"),
        }
    }
}

fn is_transient(code: RDKafkaErrorCode) -> bool {
    matches!(
        code,
        RDKafkaErrorCode::BrokerTransportFailure
            | RDKafkaErrorCode::AllBrokersDown
            | RDKafkaErrorCode::Resolve
    )
}

/// Map a syslog-style librdkafka level onto a `tracing` level.
pub fn tracing_level(level: RDKafkaLogLevel) -> Level {
    match level {
        RDKafkaLogLevel::Emerg
        | RDKafkaLogLevel::Alert
        | RDKafkaLogLevel::Critical
        | RDKafkaLogLevel::Error => Level::ERROR,
        RDKafkaLogLevel::Warning => Level::WARN,
        RDKafkaLogLevel::Notice | RDKafkaLogLevel::Info => Level::INFO,
        RDKafkaLogLevel::Debug => Level::DEBUG,
    }
}

/// librdkafka log level matching the most verbose level `tracing` will
/// record for [`LOG_TARGET`].
///
/// Call after the subscriber is installed. With the target disabled the
/// client only emits emergencies.
pub fn client_log_level() -> RDKafkaLogLevel {
    if tracing::enabled!(target: LOG_TARGET, Level::DEBUG) {
        RDKafkaLogLevel::Debug
    } else if tracing::enabled!(target: LOG_TARGET, Level::INFO) {
        RDKafkaLogLevel::Info
    } else if tracing::enabled!(target: LOG_TARGET, Level::WARN) {
        RDKafkaLogLevel::Warning
    } else if tracing::enabled!(target: LOG_TARGET, Level::ERROR) {
        RDKafkaLogLevel::Error
    } else {
        RDKafkaLogLevel::Emerg
    }
}
