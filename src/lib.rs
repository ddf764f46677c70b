//! kafka-loadgen library
//!
//! A synthetic load generator that produces randomized message batches to a
//! Kafka cluster from a pool of independent workers.
//!
//! # Components
//!
//! - `loadtest_generator::BatchGenerator` - randomized payload batches
//! - `producer_gateway::ProduceGateway` - batch send with per-record results
//! - [`worker::Worker`] - jittered start, one batch per tick
//! - [`pool::WorkerPool`] - starts N workers and joins them
//! - [`shutdown`] - fire-once stop signal fed by SIGINT/SIGTERM
//!
//! # CLI Usage
//!
//! ```bash
//! kafka-loadgen \
//!   --brokers localhost:19092,localhost:29092 \
//!   --topic test-topic \
//!   --worker-count 10 \
//!   --worker-period 1s
//! ```

pub mod config;
pub mod pool;
pub mod shutdown;
pub mod worker;

pub use config::{parse_duration, LoadgenArgs};
pub use pool::{PoolConfig, PoolReport, WorkerPool};
pub use shutdown::{ShutdownSignal, SignalListener, TerminationCause};
pub use worker::{Worker, WorkerId, WorkerStats};
