//! Move observer.
//!
//! Waits for the page's move-list element to appear, then turns every
//! mutation of that element into an `updateMoveList` notification. There is
//! no debouncing and no equality check: every mutation produces a
//! notification as long as the element is present when it is read.

use std::sync::Arc;
use std::time::Duration;

use relay_core::error::RelayError;
use relay_core::notation::normalize_move_text;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::coordinator::CoordinatorHandle;

// ── Page boundary ─────────────────────────────────────────────────────────────

/// Kind of change reported by a [`PageSource`]. The observer reacts to all of
/// them the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Attributes,
    ChildList,
    Subtree,
}

/// The single page element that holds the move list.
pub trait PageSource: Send + Sync + 'static {
    /// Current text content of the element, or `None` while it is absent.
    /// May block; the observer calls it on the blocking pool.
    fn text_content(&self) -> Option<String>;

    /// Start watching the element. Records arrive until the receiver is
    /// dropped.
    fn observe(&self) -> mpsc::UnboundedReceiver<MutationKind>;
}

// ── MoveObserver ──────────────────────────────────────────────────────────────

pub struct MoveObserver<P> {
    page: Arc<P>,
    coordinator: CoordinatorHandle,
    attach_interval: Duration,
}

impl<P: PageSource> MoveObserver<P> {
    pub fn new(page: Arc<P>, coordinator: CoordinatorHandle, attach_interval: Duration) -> Self {
        Self {
            page,
            coordinator,
            attach_interval,
        }
    }

    /// Spawn the observer task.
    ///
    /// The task probes for the element every `attach_interval` until it shows
    /// up, then stops probing and follows the mutation feed. If the element
    /// never appears the task simply keeps waiting.
    pub fn attach(self) -> ObserverHandle {
        ObserverHandle {
            handle: tokio::spawn(self.run()),
        }
    }

    async fn run(self) {
        let mut mutations = self.wait_for_element().await;

        while let Some(kind) = mutations.recv().await {
            tracing::trace!(?kind, "move list mutation");
            if let Err(e) = self.emit().await {
                tracing::debug!(error = %e, "coordinator unreachable; detaching observer");
                return;
            }
        }

        tracing::debug!("mutation feed ended");
    }

    async fn wait_for_element(&self) -> mpsc::UnboundedReceiver<MutationKind> {
        let mut probe = time::interval(self.attach_interval);
        probe.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            probe.tick().await;
            if self.read_text().await.is_some() {
                tracing::info!("move list element found; observing mutations");
                return self.page.observe();
            }
            tracing::debug!("move list element not found yet");
        }
    }

    async fn read_text(&self) -> Option<String> {
        let page = Arc::clone(&self.page);
        match tokio::task::spawn_blocking(move || page.text_content()).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "page read task failed");
                None
            }
        }
    }

    /// Read, normalize, and send the move list. Absence of the element is
    /// not an error; nothing is sent.
    async fn emit(&self) -> Result<(), RelayError> {
        let Some(text) = self.read_text().await else {
            tracing::debug!("move list element vanished; skipping notification");
            return Ok(());
        };
        let moves = normalize_move_text(&text);
        tracing::debug!(tokens = moves.len(), "sending updateMoveList");
        self.coordinator.update_move_list(moves).await
    }
}

// ── ObserverHandle ────────────────────────────────────────────────────────────

/// The observer's watch handle.
pub struct ObserverHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl ObserverHandle {
    /// Stop observing.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
