//! UI reporter.
//!
//! An activation fires the three coordinator queries at once and forwards
//! each answer as soon as it lands. Nothing is cached between activations;
//! a query that fails simply never produces an update.

use relay_core::models::{MoveList, Readiness};
use relay_runtime::coordinator::CoordinatorHandle;
use tokio::sync::mpsc;

use crate::site::{classify_url, SiteStatus};

/// One resolved query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportUpdate {
    Connection(SiteStatus),
    Server(Readiness),
    Moves(MoveList),
}

pub struct Reporter {
    coordinator: CoordinatorHandle,
}

impl Reporter {
    pub fn new(coordinator: CoordinatorHandle) -> Self {
        Self { coordinator }
    }

    /// Issue `getTabUrl`, `getReadiness`, and `getMoveList` concurrently.
    ///
    /// Updates arrive in completion order. The receiver closes once all three
    /// queries have finished, successfully or not.
    pub fn activate(&self) -> mpsc::UnboundedReceiver<ReportUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();

        let (coordinator, updates) = (self.coordinator.clone(), tx.clone());
        tokio::spawn(async move {
            match coordinator.tab_url().await {
                Ok(url) => {
                    let _ = updates.send(ReportUpdate::Connection(classify_url(&url)));
                }
                Err(e) => tracing::debug!(error = %e, "tab url query failed"),
            }
        });

        let (coordinator, updates) = (self.coordinator.clone(), tx.clone());
        tokio::spawn(async move {
            match coordinator.readiness().await {
                Ok(readiness) => {
                    let _ = updates.send(ReportUpdate::Server(readiness));
                }
                Err(e) => tracing::debug!(error = %e, "readiness query failed"),
            }
        });

        let (coordinator, updates) = (self.coordinator.clone(), tx);
        tokio::spawn(async move {
            match coordinator.move_list().await {
                Ok(moves) => {
                    let _ = updates.send(ReportUpdate::Moves(moves));
                }
                Err(e) => tracing::debug!(error = %e, "move list query failed"),
            }
        });

        rx
    }
}
