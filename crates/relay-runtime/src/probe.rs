//! Periodic backend readiness probe.
//!
//! Runs in its own tokio task and reports each result to the coordinator as
//! a message, so the coordinator stays the only writer of readiness. Every
//! check is bounded by a timeout; a slow backend delays the next check but
//! can never stall the loop.

use std::sync::Arc;
use std::time::Duration;

use relay_core::error::RelayError;
use relay_core::models::Readiness;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::backend::Backend;
use crate::coordinator::Envelope;

pub struct ReadinessProbe<B> {
    backend: Arc<B>,
    interval: Duration,
    timeout: Duration,
}

impl<B: Backend> ReadinessProbe<B> {
    pub fn new(backend: Arc<B>, interval: Duration, timeout: Duration) -> Self {
        Self {
            backend,
            interval,
            timeout,
        }
    }

    /// Run one bounded readiness check.
    pub async fn check(&self) -> Readiness {
        match time::timeout(self.timeout, self.backend.readiness()).await {
            Ok(Ok(())) => Readiness::Ready,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "readiness probe failed");
                Readiness::NotReady
            }
            Err(_) => {
                let e = RelayError::Timeout {
                    operation: "readiness probe",
                    elapsed: self.timeout,
                };
                tracing::debug!(error = %e, "readiness probe failed");
                Readiness::NotReady
            }
        }
    }

    pub(crate) fn spawn(self, sink: mpsc::Sender<Envelope>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(sink))
    }

    /// Probe immediately, then once per interval, until the coordinator's
    /// mailbox closes.
    async fn run(self, sink: mpsc::Sender<Envelope>) {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let readiness = self.check().await;
            if sink.send(Envelope::Probed(readiness)).await.is_err() {
                tracing::debug!("coordinator mailbox closed; stopping readiness probe");
                break;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
