//! Producer gateway abstraction.
//!
//! This crate defines the `ProduceGateway` trait that abstracts over the
//! message-broker client. The Kafka implementation lives in
//! `loadgen-kafka-producer`; tests substitute in-memory stubs.
//!
//! The gateway works on plain payload slices and reports one
//! `ProduceResult` per payload, so callers never depend on client-specific
//! request or response types.

mod error;
mod traits;

pub use error::ProduceError;
pub use traits::{Delivery, ProduceGateway, ProduceResult};
