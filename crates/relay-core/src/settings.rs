use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{RelayError, Result};

const VIEWS: [&str; 2] = ["popup", "headless"];
const THEMES: [&str; 3] = ["light", "dark", "auto"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Relay a chess.com move list to a local analysis backend
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chess-relay",
    about = "Relay a chess.com move list to a local analysis backend",
    version
)]
pub struct Settings {
    /// Base URL of the analysis backend
    #[arg(long, env = "CHESS_RELAY_BACKEND", default_value = "http://127.0.0.1:5000")]
    pub backend_url: String,

    /// Game identifier sent with every relayed move list
    #[arg(long, default_value = "chesscom")]
    pub game_id: String,

    /// File holding the text content of the page's move-list element
    #[arg(long)]
    pub page_file: Option<PathBuf>,

    /// URL reported as the active tab
    #[arg(long, default_value = "https://www.chess.com/play/online")]
    pub tab_url: String,

    /// View mode
    #[arg(long, default_value = "popup", value_parser = VIEWS)]
    pub view: String,

    /// Readiness probe interval in seconds (1-60)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=60))]
    pub probe_interval: u32,

    /// Timeout for each backend request in seconds (1-30)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=30))]
    pub probe_timeout: u32,

    /// Interval between attempts to find the move-list element, in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(50..=60_000))]
    pub attach_interval_ms: u64,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = THEMES)]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── Saved preferences ──────────────────────────────────────────────────────────

/// Preferences remembered between runs in `~/.chess-relay/last_used.json`.
///
/// Move lists and readiness are never written to disk.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl LastUsedParams {
    pub fn default_path() -> PathBuf {
        Self::path_under(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn path_under(home: &Path) -> PathBuf {
        home.join(".chess-relay").join("last_used.json")
    }

    /// Missing or unreadable files yield empty preferences.
    pub fn read(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::debug!(error = %e, path = %path.display(), "ignoring unreadable preferences");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Write through a sibling temp file and rename into place.
    pub fn write(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| RelayError::Config(format!("no parent for {}", path.display())))?;
        std::fs::create_dir_all(dir)?;

        let staged = path.with_extension("json.tmp");
        std::fs::write(&staged, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&staged, path)?;
        Ok(())
    }

    pub fn remove(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Fill every setting the user did not set on the command line or
    /// through the environment. Saved values that the CLI would reject are
    /// skipped.
    fn apply_to(self, settings: &mut Settings, matches: &ArgMatches) {
        let typed = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };

        fill(&mut settings.backend_url, self.backend_url, typed("backend_url"));
        fill(&mut settings.game_id, self.game_id, typed("game_id"));
        fill(
            &mut settings.probe_interval,
            self.probe_interval.filter(|secs| (1..=60).contains(secs)),
            typed("probe_interval"),
        );
        fill(
            &mut settings.theme,
            self.theme.filter(|name| THEMES.contains(&name.as_str())),
            typed("theme"),
        );
        fill(
            &mut settings.view,
            self.view.filter(|name| VIEWS.contains(&name.as_str())),
            typed("view"),
        );
    }
}

fn fill<T>(slot: &mut T, saved: Option<T>, typed: bool) {
    if let (false, Some(value)) = (typed, saved) {
        *slot = value;
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(settings: &Settings) -> Self {
        Self {
            backend_url: Some(settings.backend_url.clone()),
            game_id: Some(settings.game_id.clone()),
            probe_interval: Some(settings.probe_interval),
            theme: Some(settings.theme.clone()),
            view: Some(settings.view.clone()),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments against saved preferences in the default
    /// location.
    pub fn load_with_last_used() -> Self {
        Self::from_args_with(std::env::args_os(), &LastUsedParams::default_path())
    }

    /// Parse `args`, backfill from the preferences at `prefs`, then save the
    /// merged result back. `--clear` deletes the file and skips both steps.
    pub fn from_args_with<I, T>(args: I, prefs: &Path) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Settings::command().get_matches_from(args);
        let mut settings = match Settings::from_arg_matches(&matches) {
            Ok(settings) => settings,
            Err(e) => e.exit(),
        };

        if settings.clear {
            if let Err(e) = LastUsedParams::remove(prefs) {
                tracing::warn!(error = %e, "failed to clear saved configuration");
            }
        } else {
            LastUsedParams::read(prefs).apply_to(&mut settings, &matches);
            if let Err(e) = LastUsedParams::from(&settings).write(prefs) {
                tracing::debug!(error = %e, "could not save preferences");
            }
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Backend base URL without a trailing slash.
    pub fn backend_base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.probe_interval))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.probe_timeout))
    }

    pub fn attach_interval(&self) -> Duration {
        Duration::from_millis(self.attach_interval_ms)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
