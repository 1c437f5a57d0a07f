//! State coordinator.
//!
//! [`Coordinator::start`] spawns a task that owns the one and only
//! [`SharedState`] and a [`ReadinessProbe`] task that feeds it readiness
//! results. Everything else talks to the state through a cloneable
//! [`CoordinatorHandle`]; messages are handled one at a time in arrival
//! order, so no locking is needed.
//!
//! Work that could block (relaying to the backend, asking the host for the
//! active tab) is spawned off the coordinator task. Relays are fire-and-forget
//! and never retried; a later `updateMoveList` carries the newer state.

use std::sync::Arc;
use std::time::Duration;

use relay_core::error::{RelayError, Result};
use relay_core::messages::{Request, Response};
use relay_core::models::{MoveList, Readiness, RelayRequest, SharedState};
use tokio::sync::{mpsc, oneshot};

use crate::backend::Backend;
use crate::host::TabHost;
use crate::probe::ReadinessProbe;

/// Mailbox depth. Senders wait when the coordinator falls this far behind.
const MAILBOX_CAPACITY: usize = 64;

// ── Envelope ──────────────────────────────────────────────────────────────────

/// Everything the coordinator task can receive.
pub(crate) enum Envelope {
    /// A protocol request, with a reply slot when the action expects one.
    Request {
        request: Request,
        reply: Option<oneshot::Sender<Response>>,
    },
    /// Result of one readiness probe.
    Probed(Readiness),
}

// ── CoordinatorConfig ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Identifier sent with every relayed move list.
    pub game_id: String,
    /// Delay between readiness probes.
    pub probe_interval: Duration,
    /// Upper bound on a single readiness probe.
    pub probe_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            game_id: "chesscom".to_string(),
            probe_interval: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(3),
        }
    }
}

// ── Coordinator ───────────────────────────────────────────────────────────────

pub struct Coordinator<B, H> {
    config: CoordinatorConfig,
    backend: Arc<B>,
    host: Arc<H>,
}

impl<B: Backend, H: TabHost> Coordinator<B, H> {
    pub fn new(config: CoordinatorConfig, backend: Arc<B>, host: Arc<H>) -> Self {
        Self {
            config,
            backend,
            host,
        }
    }

    /// Spawn the coordinator and its readiness probe.
    ///
    /// Returns the handle other contexts use to reach the coordinator and a
    /// [`CoordinatorTask`] that shuts both tasks down.
    pub fn start(self) -> (CoordinatorHandle, CoordinatorTask) {
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);

        let probe = ReadinessProbe::new(
            Arc::clone(&self.backend),
            self.config.probe_interval,
            self.config.probe_timeout,
        )
        .spawn(tx.clone());

        let worker = Worker {
            state: SharedState::default(),
            backend: self.backend,
            host: self.host,
            game_id: self.config.game_id,
        };
        let handle = tokio::spawn(worker.run(rx));

        (CoordinatorHandle { tx }, CoordinatorTask { handle, probe })
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

/// The coordinator task's private state.
struct Worker<B, H> {
    state: SharedState,
    backend: Arc<B>,
    host: Arc<H>,
    game_id: String,
}

impl<B: Backend, H: TabHost> Worker<B, H> {
    async fn run(mut self, mut rx: mpsc::Receiver<Envelope>) {
        tracing::debug!("coordinator started");

        while let Some(envelope) = rx.recv().await {
            match envelope {
                Envelope::Probed(readiness) => self.set_readiness(readiness),
                Envelope::Request { request, reply } => self.handle(request, reply),
            }
        }

        tracing::debug!("coordinator mailbox closed; dropping shared state");
    }

    /// Last writer wins. Becoming ready does not flush the current moves;
    /// only the next `updateMoveList` triggers a relay.
    fn set_readiness(&mut self, readiness: Readiness) {
        if self.state.readiness != readiness {
            tracing::info!(%readiness, "backend readiness changed");
        }
        self.state.readiness = readiness;
    }

    fn handle(&mut self, request: Request, reply: Option<oneshot::Sender<Response>>) {
        match request {
            Request::UpdateMoveList { moves } => {
                if moves == self.state.move_list {
                    tracing::debug!(tokens = moves.len(), "move list unchanged");
                }
                self.state.move_list = moves;
                if self.state.readiness.is_ready() {
                    self.relay();
                }
            }
            Request::GetMoveList => respond(
                reply,
                Response::Moves {
                    moves: self.state.move_list.clone(),
                },
            ),
            Request::GetReadiness => respond(
                reply,
                Response::Readiness {
                    ready: self.state.readiness.is_ready(),
                },
            ),
            Request::GetTabUrl => {
                let host = Arc::clone(&self.host);
                tokio::spawn(async move {
                    match host.active_tab_url().await {
                        Ok(url) => respond(reply, Response::TabUrl { url }),
                        Err(e) => tracing::warn!(error = %e, "active tab lookup failed"),
                    }
                });
            }
        }
    }

    /// Fire-and-forget POST of the current move list.
    fn relay(&self) {
        let request = RelayRequest::new(self.state.move_list.clone(), self.game_id.clone());
        let backend = Arc::clone(&self.backend);

        tokio::spawn(async move {
            let tokens = request.moves.len();
            match backend.update_moves(request).await {
                Ok(()) => tracing::debug!(tokens, "move list relayed"),
                Err(e) => tracing::warn!(error = %e, tokens, "relay failed"),
            }
        });
    }
}

fn respond(reply: Option<oneshot::Sender<Response>>, response: Response) {
    if let Some(tx) = reply {
        if tx.send(response).is_err() {
            tracing::debug!("requester went away before the reply was ready");
        }
    }
}

// ── CoordinatorHandle ─────────────────────────────────────────────────────────

/// Cloneable address of the coordinator.
///
/// Every method is a single request; replies come back through a oneshot
/// channel. Once the coordinator is gone every call fails with
/// [`RelayError::ChannelClosed`].
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<Envelope>,
}

impl CoordinatorHandle {
    /// Deliver any protocol request. Notifications resolve to `Ok(None)` as
    /// soon as they are queued.
    pub async fn dispatch(&self, request: Request) -> Result<Option<Response>> {
        let action = request.action();

        if !request.expects_reply() {
            self.send(Envelope::Request {
                request,
                reply: None,
            })
            .await?;
            return Ok(None);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Envelope::Request {
            request,
            reply: Some(reply_tx),
        })
        .await?;

        reply_rx
            .await
            .map(Some)
            .map_err(|_| RelayError::NoReply(action))
    }

    /// JSON form of [`dispatch`](Self::dispatch): one wire request in, an
    /// optional wire reply out.
    pub async fn dispatch_json(&self, raw: &str) -> Result<Option<String>> {
        let request: Request = serde_json::from_str(raw)?;
        match self.dispatch(request).await? {
            Some(response) => Ok(Some(serde_json::to_string(&response)?)),
            None => Ok(None),
        }
    }

    /// `updateMoveList`.
    pub async fn update_move_list(&self, moves: MoveList) -> Result<()> {
        self.dispatch(Request::UpdateMoveList { moves }).await?;
        Ok(())
    }

    /// `getMoveList`.
    pub async fn move_list(&self) -> Result<MoveList> {
        match self.dispatch(Request::GetMoveList).await? {
            Some(Response::Moves { moves }) => Ok(moves),
            _ => Err(RelayError::UnexpectedReply("getMoveList")),
        }
    }

    /// `getReadiness`.
    pub async fn readiness(&self) -> Result<Readiness> {
        match self.dispatch(Request::GetReadiness).await? {
            Some(Response::Readiness { ready }) => Ok(Readiness::from(ready)),
            _ => Err(RelayError::UnexpectedReply("getReadiness")),
        }
    }

    /// `getTabUrl`. Resolves only once the host has answered.
    pub async fn tab_url(&self) -> Result<String> {
        match self.dispatch(Request::GetTabUrl).await? {
            Some(Response::TabUrl { url }) => Ok(url),
            _ => Err(RelayError::UnexpectedReply("getTabUrl")),
        }
    }

    async fn send(&self, envelope: Envelope) -> Result<()> {
        self.tx
            .send(envelope)
            .await
            .map_err(|_| RelayError::ChannelClosed)
    }
}

// ── CoordinatorTask ───────────────────────────────────────────────────────────

/// Owns the coordinator and probe tasks.
pub struct CoordinatorTask {
    handle: tokio::task::JoinHandle<()>,
    probe: tokio::task::JoinHandle<()>,
}

impl CoordinatorTask {
    /// Stop the probe and the coordinator. The shared state is dropped with
    /// the coordinator task.
    pub fn abort(&self) {
        self.probe.abort();
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
