//! ProduceGateway trait definition.

use crate::error::ProduceError;
use bytes::Bytes;

/// Where a record landed once acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Outcome of a single record, correlated by position with its payload.
pub type ProduceResult = Result<Delivery, ProduceError>;

/// Trait for submitting payload batches to a message broker.
///
/// Implementations are shared by every worker through an `Arc` and must be
/// safe to call concurrently.
///
/// # Contract
///
/// - `produce_batch` resolves only once every payload has a definitive
///   result (delivered or terminally failed).
/// - The returned vector has exactly `payloads.len()` entries, and entry `i`
///   belongs to `payloads[i]`.
/// - An empty slice returns an empty vector without talking to the broker.
/// - Payloads are sent without a key.
#[async_trait::async_trait]
pub trait ProduceGateway: Send + Sync {
    /// Submit `payloads` and wait for a result for each of them.
    async fn produce_batch(&self, payloads: &[Bytes]) -> Vec<ProduceResult>;
}
