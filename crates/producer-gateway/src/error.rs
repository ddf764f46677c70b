//! Per-record produce failures.

use thiserror::Error;

/// Terminal failure of a single record.
///
/// Every variant is reported at the index of the failed payload and never
/// aborts the accounting of the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProduceError {
    /// The record could not reach a broker.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A broker refused the record.
    #[error("rejected by broker: {0}")]
    Rejected(String),

    /// The client gave up after exhausting its retries or delivery timeout.
    #[error("timed out: {0}")]
    TimedOut(String),
}

impl ProduceError {
    /// Short label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProduceError::Transport(_) => "transport",
            ProduceError::Rejected(_) => "rejected",
            ProduceError::TimedOut(_) => "timed_out",
        }
    }
}
