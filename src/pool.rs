//! Worker pool orchestration.

use crate::shutdown::ShutdownSignal;
use crate::worker::{Worker, WorkerId, WorkerStats};
use producer_gateway::ProduceGateway;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info};

/// Validated pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    worker_count: usize,
    tick_interval: Duration,
}

impl PoolConfig {
    /// Build a pool configuration.
    ///
    /// Fails when `worker_count` is zero or `tick_interval` is zero.
    pub fn new(worker_count: usize, tick_interval: Duration) -> anyhow::Result<Self> {
        if worker_count == 0 {
            anyhow::bail!("Worker count must be at least 1");
        }
        if tick_interval.is_zero() {
            anyhow::bail!("Worker period must be greater than zero");
        }
        Ok(Self {
            worker_count,
            tick_interval,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

/// Summary of a finished pool run.
#[derive(Debug, Clone, Default)]
pub struct PoolReport {
    /// Workers that stopped normally
    pub workers: usize,
    /// Combined accounting of those workers
    pub stats: WorkerStats,
    /// Accounting of each stopped worker, in id order
    pub per_worker: Vec<(WorkerId, WorkerStats)>,
    /// Time from pool start until the last worker stopped
    pub duration: Duration,
}

impl PoolReport {
    /// Delivered records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.stats.records_delivered as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} workers, {} ticks, {} records attempted, {} delivered, {} failed, {} bytes delivered in {:.2}s ({:.2} records/sec)",
            self.workers,
            self.stats.ticks,
            self.stats.records_attempted,
            self.stats.records_delivered,
            self.stats.records_failed,
            self.stats.bytes_delivered,
            self.duration.as_secs_f64(),
            self.records_per_second()
        )
    }
}

/// Pool of workers sharing one gateway and one shutdown signal.
pub struct WorkerPool<G> {
    config: PoolConfig,
    gateway: Arc<G>,
}

impl<G: ProduceGateway + 'static> WorkerPool<G> {
    pub fn new(config: PoolConfig, gateway: Arc<G>) -> Self {
        Self { config, gateway }
    }

    /// Start every worker and wait until all of them have stopped.
    ///
    /// Returns only after `shutdown` has fired and each worker has finished
    /// its in-flight batch. Workers are not restarted; one that panics is
    /// logged and left out of the report.
    pub async fn run(&self, shutdown: ShutdownSignal) -> PoolReport {
        let start = Instant::now();

        info!(
            "Starting {} workers (period: {:?})",
            self.config.worker_count, self.config.tick_interval
        );

        let handles: Vec<(WorkerId, JoinHandle<WorkerStats>)> = (0..self.config.worker_count)
            .map(|id| {
                let worker = Worker::new(id, self.config.tick_interval, Arc::clone(&self.gateway));
                (id, tokio::spawn(worker.run(shutdown.clone())))
            })
            .collect();

        let mut report = PoolReport::default();
        for (id, handle) in handles {
            match handle.await {
                Ok(stats) => {
                    report.workers += 1;
                    report.stats.merge(&stats);
                    report.per_worker.push((id, stats));
                }
                Err(e) => error!("worker {id} terminated abnormally: {e}"),
            }
        }
        report.duration = start.elapsed();

        info!("All workers stopped: {report}");
        report
    }
}
