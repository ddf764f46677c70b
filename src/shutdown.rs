//! Shutdown signal broadcast to all workers.
//!
//! `ShutdownSignal` is a fire-once broadcast: every clone observes the same
//! state, and once fired it stays fired. `SignalListener` turns the first
//! SIGINT or SIGTERM into a fired signal.

use std::fmt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Process-wide stop notification shared by every worker.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Firing more than once has no further effect.
    pub fn fire(&self) {
        self.token.cancel();
    }

    /// Whether the signal has been fired.
    pub fn is_fired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the signal is fired.
    pub async fn fired(&self) {
        self.token.cancelled().await
    }
}

/// Termination request that triggered a shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationCause::Interrupt => write!(f, "SIGINT"),
            TerminationCause::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Listener for operator termination requests.
///
/// Handlers are registered by `install`, so a signal delivered after it
/// returns is never lost. Once installed, the handlers stay registered for
/// the life of the process and later signals are ignored.
pub struct SignalListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl SignalListener {
    /// Register the SIGINT and SIGTERM handlers.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next termination request.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> TerminationCause {
        tokio::select! {
            _ = self.interrupt.recv() => TerminationCause::Interrupt,
            _ = self.terminate.recv() => TerminationCause::Terminate,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> TerminationCause {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        TerminationCause::Interrupt
    }

    /// Fire `shutdown` on the first termination request.
    ///
    /// The task resolves to the cause, or to `None` if `shutdown` was fired
    /// by someone else first.
    pub fn spawn(mut self, shutdown: ShutdownSignal) -> JoinHandle<Option<TerminationCause>> {
        tokio::spawn(async move {
            tokio::select! {
                cause = self.recv() => {
                    info!("Received signal {cause}, stopping");
                    shutdown.fire();
                    Some(cause)
                }
                _ = shutdown.fired() => None,
            }
        })
    }
}
