//! In-memory gateway stubs.

use bytes::Bytes;
use kafka_loadgen::ShutdownSignal;
use producer_gateway::{Delivery, ProduceError, ProduceGateway, ProduceResult};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One `produce_batch` call as seen by the stub.
#[derive(Debug, Clone)]
pub struct Call {
    /// When the call started
    pub at: Instant,
    /// Length of every payload in the batch
    pub payload_lens: Vec<usize>,
    /// Indices the stub reported as failed
    pub failed: Vec<usize>,
}

/// Gateway that records calls and optionally fails or stalls.
#[derive(Default)]
pub struct StubGateway {
    calls: Mutex<Vec<Call>>,
    /// Fail every n-th record of each batch (1-based)
    fail_every: Option<usize>,
    /// Time spent "sending" each batch
    delay: Duration,
    /// Fired at the start of the first call
    fire_on_first_call: Option<ShutdownSignal>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_every(mut self, n: usize) -> Self {
        self.fail_every = Some(n);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn firing_on_first_call(mut self, shutdown: ShutdownSignal) -> Self {
        self.fire_on_first_call = Some(shutdown);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn fails(&self, index: usize) -> bool {
        self.fail_every.is_some_and(|n| (index + 1) % n == 0)
    }
}

#[async_trait::async_trait]
impl ProduceGateway for StubGateway {
    async fn produce_batch(&self, payloads: &[Bytes]) -> Vec<ProduceResult> {
        let at = Instant::now();
        let first_call = self.calls.lock().unwrap().is_empty();
        if first_call {
            if let Some(shutdown) = &self.fire_on_first_call {
                shutdown.fire();
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let results: Vec<ProduceResult> = (0..payloads.len())
            .map(|index| {
                if self.fails(index) {
                    Err(ProduceError::Rejected(format!("injected failure at {index}")))
                } else {
                    Ok(Delivery {
                        partition: 0,
                        offset: index as i64,
                    })
                }
            })
            .collect();

        self.calls.lock().unwrap().push(Call {
            at,
            payload_lens: payloads.iter().map(|p| p.len()).collect(),
            failed: (0..payloads.len()).filter(|i| self.fails(*i)).collect(),
        });

        results
    }
}

/// Fire `shutdown` after `after` on the (paused) tokio clock.
pub fn fire_after(shutdown: &ShutdownSignal, after: Duration) -> tokio::task::JoinHandle<()> {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        shutdown.fire();
    })
}

/// Initialize logging for tests
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kafka_loadgen=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
