//! Host environment queries.

use std::future::Future;

use relay_core::error::{RelayError, Result};

/// Answers questions about the browsing environment the relay runs in.
pub trait TabHost: Send + Sync + 'static {
    /// URL of the currently active tab.
    fn active_tab_url(&self) -> impl Future<Output = Result<String>> + Send;
}

/// A host whose active tab never changes.
#[derive(Debug, Clone)]
pub struct StaticTab {
    url: String,
}

impl StaticTab {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TabHost for StaticTab {
    async fn active_tab_url(&self) -> Result<String> {
        if self.url.is_empty() {
            return Err(RelayError::TabUnavailable("no active tab".to_string()));
        }
        Ok(self.url.clone())
    }
}
