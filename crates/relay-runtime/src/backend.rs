//! HTTP client for the analysis backend.
//!
//! Only two endpoints matter: `GET <base>/readiness` (200 means ready) and
//! `POST <base>/update_moves`. Both calls are best-effort; callers decide what
//! a failure means and nothing here retries.

use std::future::Future;
use std::time::Duration;

use relay_core::error::{RelayError, Result};
use relay_core::models::RelayRequest;
use reqwest::{Client, StatusCode};

/// Readiness endpoint path.
pub const READINESS_PATH: &str = "/readiness";

/// Move update endpoint path.
pub const UPDATE_MOVES_PATH: &str = "/update_moves";

// ── Backend trait ─────────────────────────────────────────────────────────────

/// The backend as seen by the coordinator and the readiness probe.
pub trait Backend: Send + Sync + 'static {
    /// `Ok(())` iff the backend answered the readiness check with HTTP 200.
    fn readiness(&self) -> impl Future<Output = Result<()>> + Send;

    /// Send the current move list. The response body is ignored.
    fn update_moves(&self, request: RelayRequest) -> impl Future<Output = Result<()>> + Send;
}

// ── HttpBackend ───────────────────────────────────────────────────────────────

/// `reqwest`-based [`Backend`] with a per-request timeout.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url` (no trailing slash expected).
    ///
    /// `timeout` bounds every request so a hung backend can never hold up a
    /// probe past its slot.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(RelayError::Config("backend url is empty".to_string()));
        }
        let client = Client::builder()
            .user_agent(concat!("chess-relay/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Backend for HttpBackend {
    async fn readiness(&self) -> Result<()> {
        let resp = self.client.get(self.url(READINESS_PATH)).send().await?;

        if resp.status() != StatusCode::OK {
            return Err(RelayError::BackendStatus {
                endpoint: READINESS_PATH.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn update_moves(&self, request: RelayRequest) -> Result<()> {
        let resp = self
            .client
            .post(self.url(UPDATE_MOVES_PATH))
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RelayError::BackendStatus {
                endpoint: UPDATE_MOVES_PATH.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
