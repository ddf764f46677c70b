//! Pool start, accounting and shutdown behaviour.

use crate::stub::{fire_after, init_logging, StubGateway};
use kafka_loadgen::{PoolConfig, ShutdownSignal, WorkerPool, WorkerStats};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const TICK: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn test_pool_starts_and_joins_every_worker() {
    init_logging();

    for worker_count in [1, 3, 8] {
        let gateway = Arc::new(StubGateway::new());
        let pool = WorkerPool::new(PoolConfig::new(worker_count, TICK).unwrap(), gateway.clone());
        let shutdown = ShutdownSignal::new();
        let stopper = fire_after(&shutdown, Duration::from_secs(1));

        let report = pool.run(shutdown.clone()).await;
        stopper.await.unwrap();

        assert!(shutdown.is_fired());
        assert_eq!(report.workers, worker_count);
        // Every worker ticks at least nine times within one second.
        assert!(
            report.stats.ticks >= 9 * worker_count as u64,
            "{worker_count} workers only ticked {} times",
            report.stats.ticks
        );
        assert_eq!(report.stats.ticks, gateway.calls().len() as u64);
        assert_eq!(report.stats.records_failed, 0);
        assert_eq!(report.stats.records_delivered, report.stats.records_attempted);
    }
}

#[tokio::test(start_paused = true)]
async fn test_workers_have_distinct_ids() {
    init_logging();

    let worker_count = 5;
    let gateway = Arc::new(StubGateway::new());
    let pool = WorkerPool::new(PoolConfig::new(worker_count, TICK).unwrap(), gateway);
    let shutdown = ShutdownSignal::new();
    fire_after(&shutdown, Duration::from_secs(1));

    let report = pool.run(shutdown).await;

    let ids: Vec<usize> = report.per_worker.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, (0..worker_count).collect::<Vec<_>>());
    for (id, stats) in &report.per_worker {
        assert!(stats.ticks >= 9, "worker {id} only ticked {} times", stats.ticks);
    }

    let mut merged = WorkerStats::default();
    for (_, stats) in &report.per_worker {
        merged.merge(stats);
    }
    assert_eq!(merged, report.stats);
}

#[tokio::test(start_paused = true)]
async fn test_every_third_record_failing() {
    init_logging();

    let gateway = Arc::new(StubGateway::new().failing_every(3));
    let pool = WorkerPool::new(PoolConfig::new(1, TICK).unwrap(), gateway.clone());
    let shutdown = ShutdownSignal::new();
    fire_after(&shutdown, Duration::from_secs(1));

    let report = pool.run(shutdown).await;
    let calls = gateway.calls();

    assert!(report.stats.ticks >= 9, "only {} ticks", report.stats.ticks);
    assert_eq!(report.stats.ticks, calls.len() as u64);

    let attempted: usize = calls.iter().map(|c| c.payload_lens.len()).sum();
    let injected: usize = calls.iter().map(|c| c.payload_lens.len() / 3).sum();
    let failed: usize = calls.iter().map(|c| c.failed.len()).sum();
    let delivered_bytes: usize = calls
        .iter()
        .flat_map(|c| {
            c.payload_lens
                .iter()
                .enumerate()
                .filter(|(i, _)| !c.failed.contains(i))
                .map(|(_, len)| *len)
        })
        .sum();

    assert_eq!(failed, injected);
    assert_eq!(report.stats.records_attempted, attempted as u64);
    assert_eq!(report.stats.records_failed, injected as u64);
    assert_eq!(
        report.stats.records_delivered,
        (attempted - injected) as u64
    );
    assert_eq!(report.stats.bytes_delivered, delivered_bytes as u64);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_right_after_start_returns_promptly() {
    init_logging();

    let send_time = Duration::from_millis(50);
    let gateway = Arc::new(StubGateway::new().with_delay(send_time));
    let pool = WorkerPool::new(PoolConfig::new(4, TICK).unwrap(), gateway.clone());
    let shutdown = ShutdownSignal::new();

    let start = Instant::now();
    let run = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { pool.run(shutdown).await }
    });
    tokio::task::yield_now().await;
    shutdown.fire();

    let report = tokio::time::timeout(TICK + send_time, run)
        .await
        .expect("pool did not stop within one tick plus one send")
        .unwrap();

    assert!(start.elapsed() <= TICK + send_time);
    assert_eq!(report.workers, 4);
    assert_eq!(report.stats.ticks, gateway.calls().len() as u64);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_start_produces_nothing() {
    let gateway = Arc::new(StubGateway::new());
    let pool = WorkerPool::new(PoolConfig::new(2, TICK).unwrap(), gateway.clone());
    let shutdown = ShutdownSignal::new();
    shutdown.fire();

    let report = pool.run(shutdown).await;

    assert_eq!(report.workers, 2);
    assert_eq!(report.stats.ticks, 0);
    assert!(gateway.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_batch_is_accounted_after_shutdown() {
    init_logging();

    let shutdown = ShutdownSignal::new();
    let gateway = Arc::new(
        StubGateway::new()
            .with_delay(Duration::from_millis(50))
            .firing_on_first_call(shutdown.clone()),
    );
    let pool = WorkerPool::new(PoolConfig::new(1, TICK).unwrap(), gateway.clone());

    let report = pool.run(shutdown.clone()).await;
    let calls = gateway.calls();

    assert!(shutdown.is_fired());
    assert_eq!(calls.len(), 1, "no new tick may start after shutdown");
    assert_eq!(report.stats.ticks, 1);
    assert_eq!(
        report.stats.records_attempted,
        calls[0].payload_lens.len() as u64
    );
    assert_eq!(
        report.stats.records_delivered,
        calls[0].payload_lens.len() as u64
    );
}
