use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.chess-relay/`, or `./.chess-relay/` when there is no home directory.
pub fn relay_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chess-relay")
}

/// Ensure `~/.chess-relay/` and `~/.chess-relay/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let relay_dir = relay_dir();
    std::fs::create_dir_all(&relay_dir)?;
    std::fs::create_dir_all(relay_dir.join("logs"))?;
    Ok(())
}

/// Log file used by the popup view when `--log-file` is not given.
pub fn default_log_path() -> PathBuf {
    relay_dir().join("logs").join("chess-relay.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map Python-style level names onto an `EnvFilter` directive.
fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file without ANSI colours
/// so the terminal popup stays intact. Otherwise it goes to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
