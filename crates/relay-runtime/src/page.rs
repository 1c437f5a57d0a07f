//! File-backed [`PageSource`].
//!
//! The move-list element's text content is read from a file, typically kept
//! up to date by whatever scrapes the live page. A missing file means the
//! element is not on the page. Changes are detected by polling the file's
//! contents, so a rewrite that keeps the length and lands within the same
//! mtime tick is still seen; each change is reported as a child-list
//! mutation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use relay_core::error::{RelayError, Result};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::observer::{MutationKind, PageSource};

/// Default interval between change checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct FilePage {
    path: PathBuf,
    poll_interval: Duration,
}

impl FilePage {
    pub fn new(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            path: path.into(),
            poll_interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the element text. `Ok(None)` when the file does not exist.
    ///
    /// Blocking; async callers go through the blocking pool.
    pub fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RelayError::PageRead {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Raw file bytes, `None` while the file is missing or unreadable.
async fn snapshot(path: &Path) -> Option<Vec<u8>> {
    tokio::fs::read(path).await.ok()
}

impl PageSource for FilePage {
    fn text_content(&self) -> Option<String> {
        match self.read() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "page source unreadable");
                None
            }
        }
    }

    fn observe(&self) -> mpsc::UnboundedReceiver<MutationKind> {
        let (tx, rx) = mpsc::unbounded_channel();
        let path = self.path.clone();
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            let mut last = snapshot(&path).await;
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }

                let current = snapshot(&path).await;
                if current != last {
                    last = current;
                    if tx.send(MutationKind::ChildList).is_err() {
                        break;
                    }
                }
            }
            tracing::debug!(path = %path.display(), "stopped watching page file");
        });

        rx
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page_in(tmp: &TempDir) -> FilePage {
        FilePage::new(tmp.path().join("moves.txt"), Duration::from_millis(10))
    }

    #[test]
    fn test_missing_file_means_absent_element() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        assert!(page.read().unwrap().is_none());
        assert!(page.text_content().is_none());
    }

    #[test]
    fn test_reads_element_text() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        std::fs::write(page.path(), "1. e4 e5").unwrap();
        assert_eq!(page.text_content().as_deref(), Some("1. e4 e5"));
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let tmp = TempDir::new().expect("tempdir");
        let page = FilePage::new(tmp.path(), Duration::from_millis(10));
        assert!(matches!(page.read(), Err(RelayError::PageRead { .. })));
        assert!(page.text_content().is_none());
    }

    #[tokio::test]
    async fn test_observe_reports_content_changes() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        std::fs::write(page.path(), "1. e4").unwrap();

        let mut rx = page.observe();
        time::sleep(Duration::from_millis(30)).await;
        std::fs::write(page.path(), "1. e4 e5 2. Nf3").unwrap();

        let kind = time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("mutation expected")
            .expect("feed open");
        assert_eq!(kind, MutationKind::ChildList);
    }

    #[tokio::test]
    async fn test_observe_reports_same_length_rewrite() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        std::fs::write(page.path(), "1. e4 e5").unwrap();

        let mut rx = page.observe();
        time::sleep(Duration::from_millis(30)).await;
        std::fs::write(page.path(), "1. d4 d5").unwrap();

        let kind = time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(kind, Ok(Some(MutationKind::ChildList))));
    }

    #[tokio::test]
    async fn test_observe_is_quiet_without_changes() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        std::fs::write(page.path(), "1. d4").unwrap();

        let mut rx = page.observe();
        time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_observe_reports_removal() {
        let tmp = TempDir::new().expect("tempdir");
        let page = page_in(&tmp);
        std::fs::write(page.path(), "1. c4").unwrap();

        let mut rx = page.observe();
        time::sleep(Duration::from_millis(30)).await;
        std::fs::remove_file(page.path()).unwrap();

        let kind = time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(kind, Ok(Some(MutationKind::ChildList))));
        assert!(page.text_content().is_none());
    }
}
