//! Batch generator producing randomized payload batches.

use bytes::Bytes;
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::time::Duration;

/// Smallest number of payloads in a batch.
pub const MIN_BATCH_LEN: usize = 1;

/// Largest number of payloads in a batch (inclusive).
pub const MAX_BATCH_LEN: usize = 512;

/// Smallest payload length in bytes.
pub const MIN_PAYLOAD_LEN: usize = 128;

/// Upper payload length bound in bytes (exclusive).
pub const MAX_PAYLOAD_LEN: usize = 384;

/// An opaque, immutable message payload.
pub type Payload = Bytes;

/// An ordered group of payloads submitted together.
///
/// Result correlation is positional, so the order must be preserved
/// between generation and result processing.
pub type Batch = Vec<Payload>;

/// Generator of randomized payload batches.
///
/// Each worker owns its own generator; it is not shared between tasks.
pub struct BatchGenerator {
    /// Fast RNG for batch shape and jitter
    sizing: SmallRng,
    /// Secure RNG for payload content
    content: StdRng,
}

impl BatchGenerator {
    /// Create a generator with both RNGs seeded from the operating system.
    pub fn new() -> Self {
        Self {
            sizing: SmallRng::from_os_rng(),
            content: StdRng::from_os_rng(),
        }
    }

    /// Create a generator whose batch shapes are reproducible for `seed`.
    ///
    /// Payload content is still seeded from the operating system.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sizing: SmallRng::seed_from_u64(seed),
            content: StdRng::from_os_rng(),
        }
    }

    /// Generate the next batch.
    ///
    /// The item count is uniform in `[MIN_BATCH_LEN, MAX_BATCH_LEN]` and every
    /// payload length is uniform in `[MIN_PAYLOAD_LEN, MAX_PAYLOAD_LEN)`.
    pub fn next_batch(&mut self) -> Batch {
        let count = self.sizing.random_range(MIN_BATCH_LEN..=MAX_BATCH_LEN);
        (0..count).map(|_| self.next_payload()).collect()
    }

    /// Generate a single payload of random length and random content.
    pub fn next_payload(&mut self) -> Payload {
        let len = self.sizing.random_range(MIN_PAYLOAD_LEN..MAX_PAYLOAD_LEN);
        let mut buf = vec![0u8; len];
        self.content.fill_bytes(&mut buf);
        Bytes::from(buf)
    }

    /// Pick a start delay uniformly in `[0, period)`.
    ///
    /// A zero period yields a zero delay.
    pub fn jitter(&mut self, period: Duration) -> Duration {
        if period.is_zero() {
            return Duration::ZERO;
        }
        self.sizing.random_range(Duration::ZERO..period)
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}
