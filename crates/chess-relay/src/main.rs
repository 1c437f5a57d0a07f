mod bootstrap;

use std::sync::Arc;

use anyhow::Result;
use relay_core::settings::Settings;
use relay_runtime::backend::HttpBackend;
use relay_runtime::coordinator::{Coordinator, CoordinatorConfig, CoordinatorHandle};
use relay_runtime::host::StaticTab;
use relay_runtime::observer::{MoveObserver, ObserverHandle};
use relay_runtime::page::{FilePage, DEFAULT_POLL_INTERVAL};
use relay_ui::app::App;
use relay_ui::popup::PopupView;
use relay_ui::reporter::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    let log_file = match (&settings.log_file, settings.view.as_str()) {
        (Some(path), _) => Some(path.clone()),
        (None, "popup") => Some(bootstrap::default_log_path()),
        (None, _) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Chess Relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Backend: {}, Game: {}, View: {}, Theme: {}",
        settings.backend_base(),
        settings.game_id,
        settings.view,
        settings.theme
    );

    let backend = HttpBackend::new(settings.backend_base(), settings.request_timeout())?;
    let host = StaticTab::new(settings.tab_url.clone());
    let config = CoordinatorConfig {
        game_id: settings.game_id.clone(),
        probe_interval: settings.probe_interval(),
        probe_timeout: settings.request_timeout(),
    };
    let (coordinator, task) = Coordinator::new(config, Arc::new(backend), Arc::new(host)).start();

    let observer = attach_observer(&settings, &coordinator);

    match settings.view.as_str() {
        "popup" => {
            let app = App::new(&settings.theme, coordinator);

            // The loop exits on 'q' / Ctrl+C inside the TUI. The OS-level
            // signal covers Ctrl+C delivered outside raw mode.
            tokio::select! {
                result = app.run() => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }

        "headless" => {
            tracing::info!("Running headless; reporting every {:?}", settings.probe_interval());
            tokio::select! {
                _ = report_forever(coordinator, &settings) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    if let Some(observer) = observer {
        observer.abort();
    }
    task.abort();

    Ok(())
}

/// Start watching `--page-file` when one was given.
fn attach_observer(settings: &Settings, coordinator: &CoordinatorHandle) -> Option<ObserverHandle> {
    let Some(path) = settings.page_file.as_ref() else {
        tracing::warn!("no --page-file given; move list will stay empty");
        return None;
    };
    tracing::info!("Observing move list in {}", path.display());

    let page = FilePage::new(path.clone(), DEFAULT_POLL_INTERVAL);
    let observer = MoveObserver::new(
        Arc::new(page),
        coordinator.clone(),
        settings.attach_interval(),
    );
    Some(observer.attach())
}

/// Headless view: one fresh reporter activation per probe interval, logged.
async fn report_forever(coordinator: CoordinatorHandle, settings: &Settings) {
    let reporter = Reporter::new(coordinator);
    let mut ticker = tokio::time::interval(settings.probe_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let view = PopupView::collect(reporter.activate(), settings.request_timeout()).await;
        for line in view.to_plain() {
            tracing::info!("{line}");
        }
    }
}
