//! Worker pool integration tests.
//!
//! These tests drive workers and pools against in-memory stub gateways on a
//! paused tokio clock, so tick timing is exact and no broker is needed.

mod pool_lifecycle;
mod stub;
