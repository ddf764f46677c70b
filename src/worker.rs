//! Periodic batch-producing worker.
//!
//! A worker waits out a one-time random jitter, then produces one batch per
//! tick until the shutdown signal fires:
//!
//! ```text
//! Idle ──► JitterWait ──► Armed ◄──► Producing
//!              │            │
//!              └────────────┴──► Stopped
//! ```
//!
//! Shutdown is checked before every tick and wins over a tick that is ready
//! at the same time. A batch already handed to the gateway is always waited
//! for and accounted before the worker stops.

use crate::shutdown::ShutdownSignal;
use loadtest_generator::{Batch, BatchGenerator};
use producer_gateway::{ProduceGateway, ProduceResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Ordinal of a worker within its pool, used for log correlation only.
pub type WorkerId = usize;

/// Per-worker produce accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Batches produced
    pub ticks: u64,
    /// Records handed to the gateway
    pub records_attempted: u64,
    /// Records acknowledged by the broker
    pub records_delivered: u64,
    /// Records that failed terminally
    pub records_failed: u64,
    /// Payload bytes of delivered records
    pub bytes_delivered: u64,
}

impl WorkerStats {
    /// Account one produced batch.
    ///
    /// Payloads without a matching result are counted as failed.
    pub fn record_batch(&mut self, batch: &Batch, results: &[ProduceResult]) {
        self.ticks += 1;
        self.records_attempted += batch.len() as u64;

        for (payload, result) in batch.iter().zip(results) {
            match result {
                Ok(_) => {
                    self.records_delivered += 1;
                    self.bytes_delivered += payload.len() as u64;
                }
                Err(_) => self.records_failed += 1,
            }
        }
        self.records_failed += batch.len().saturating_sub(results.len()) as u64;
    }

    /// Add another worker's counters to these.
    pub fn merge(&mut self, other: &WorkerStats) {
        self.ticks += other.ticks;
        self.records_attempted += other.records_attempted;
        self.records_delivered += other.records_delivered;
        self.records_failed += other.records_failed;
        self.bytes_delivered += other.bytes_delivered;
    }
}

/// A single load-generating worker.
pub struct Worker<G> {
    id: WorkerId,
    period: Duration,
    gateway: Arc<G>,
    generator: BatchGenerator,
}

impl<G: ProduceGateway + 'static> Worker<G> {
    pub fn new(id: WorkerId, period: Duration, gateway: Arc<G>) -> Self {
        Self {
            id,
            period,
            gateway,
            generator: BatchGenerator::new(),
        }
    }

    /// Replace the batch generator, e.g. with a seeded one.
    pub fn with_generator(mut self, generator: BatchGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Run until `shutdown` fires and return the worker's accounting.
    pub async fn run(mut self, shutdown: ShutdownSignal) -> WorkerStats {
        let mut stats = WorkerStats::default();

        let delay = self.generator.jitter(self.period);
        tokio::select! {
            biased;
            _ = shutdown.fired() => {
                debug!("worker {} stopped during start jitter", self.id);
                return stats;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        info!("worker {} started after {:?}", self.id, delay);

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if shutdown.is_fired() {
                break;
            }
            tokio::select! {
                biased;
                _ = shutdown.fired() => break,
                _ = ticker.tick() => {}
            }

            self.produce_once(&mut stats).await;
        }

        info!(
            "worker {} stopped after {} ticks ({} delivered, {} failed)",
            self.id, stats.ticks, stats.records_delivered, stats.records_failed
        );
        stats
    }

    /// Generate one batch, produce it and account the results.
    async fn produce_once(&mut self, stats: &mut WorkerStats) {
        let batch = self.generator.next_batch();
        let results = self.gateway.produce_batch(&batch).await;

        if results.len() != batch.len() {
            warn!(
                "worker {}: gateway returned {} results for {} records",
                self.id,
                results.len(),
                batch.len()
            );
        }

        for (index, result) in results.iter().enumerate() {
            if let Err(e) = result {
                warn!(
                    worker = self.id,
                    index,
                    kind = e.kind(),
                    "failed to publish event {index}: {e}"
                );
            }
        }

        stats.record_batch(&batch, &results);
        debug!(
            "worker {} produced batch of {} records",
            self.id,
            batch.len()
        );
    }
}
