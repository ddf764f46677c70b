//! Randomized batch generator for the kafka-loadgen workers.
//!
//! This crate provides the `BatchGenerator` which produces batches of opaque
//! binary payloads. Batch shape (item count, payload length) and worker start
//! jitter are drawn from a fast non-secure RNG, while payload content comes
//! from a cryptographically secure RNG so that the synthetic traffic does not
//! compress trivially on the broker side.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        BatchGenerator        │
//! │                              │
//! │  - sizing  (SmallRng)  ──────┼──► item count, payload lengths, jitter
//! │  - content (StdRng)    ──────┼──► payload bytes
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//!    Batch = Vec<Payload>  (1..=512 items, 128..384 bytes each)
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadtest_generator::{BatchGenerator, MAX_BATCH_LEN, MIN_BATCH_LEN};
//!
//! let mut generator = BatchGenerator::new();
//! let batch = generator.next_batch();
//! assert!((MIN_BATCH_LEN..=MAX_BATCH_LEN).contains(&batch.len()));
//! ```

pub mod generator;

// Re-exports for convenience
pub use generator::{
    Batch, BatchGenerator, Payload, MAX_BATCH_LEN, MAX_PAYLOAD_LEN, MIN_BATCH_LEN,
    MIN_PAYLOAD_LEN,
};
