//! Terminal popup event loop.
//!
//! [`App`] activates a fresh [`Reporter`] on start and whenever the user
//! presses `r`, and redraws as query results trickle in.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use relay_runtime::coordinator::CoordinatorHandle;
use tokio::sync::mpsc;

use crate::popup::PopupView;
use crate::reporter::{ReportUpdate, Reporter};
use crate::themes::Theme;

pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Snapshot of the current activation.
    pub view: PopupView,
    coordinator: CoordinatorHandle,
    updates: Option<mpsc::UnboundedReceiver<ReportUpdate>>,
}

impl App {
    pub fn new(theme_name: &str, coordinator: CoordinatorHandle) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view: PopupView::default(),
            coordinator,
            updates: None,
        }
    }

    /// Discard the current snapshot and query the coordinator again.
    pub fn activate(&mut self) {
        self.view = PopupView::default();
        self.updates = Some(Reporter::new(self.coordinator.clone()).activate());
    }

    /// Apply whatever updates have arrived, without waiting.
    pub fn drain_updates(&mut self) {
        let Some(rx) = self.updates.as_mut() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(update) => self.view.apply(update),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.updates = None;
                    break;
                }
            }
        }
    }

    /// Run the popup until `q`, `Q`, `Esc`, or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 100 ms timeout so redraws keep up
    /// with results arriving from the reporter tasks. The terminal is restored
    /// on every exit path, including an error or the future being dropped.
    pub async fn run(mut self) -> io::Result<()> {
        let _screen = ScreenGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.activate();
        let tick_rate = Duration::from_millis(100);

        loop {
            self.drain_updates();
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Flow::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.activate();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let popup = Paragraph::new(self.view.to_lines(&self.theme))
            .block(Block::bordered().border_style(self.theme.separator));
        frame.render_widget(popup, body);

        let help = Line::from(vec![
            Span::styled("r", self.theme.value),
            Span::styled(" refresh  ", self.theme.dim),
            Span::styled("q", self.theme.value),
            Span::styled(" quit", self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), footer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Raw mode plus alternate screen for as long as the guard lives.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on Drop undoes whatever succeeded.
        let guard = ScreenGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::debug!(error = %e, "could not leave raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            tracing::debug!(error = %e, "could not restore screen");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use relay_core::error::{RelayError, Result};
    use relay_core::models::{MoveList, RelayRequest};
    use relay_runtime::backend::Backend;
    use relay_runtime::coordinator::{Coordinator, CoordinatorConfig, CoordinatorTask};
    use relay_runtime::host::StaticTab;
    use std::sync::Arc;

    struct ReadyBackend;

    impl Backend for ReadyBackend {
        async fn readiness(&self) -> Result<()> {
            Ok(())
        }

        async fn update_moves(&self, _request: RelayRequest) -> Result<()> {
            Err(RelayError::Config("not under test".to_string()))
        }
    }

    fn start() -> (CoordinatorHandle, CoordinatorTask) {
        let config = CoordinatorConfig {
            probe_interval: Duration::from_millis(10),
            probe_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        Coordinator::new(
            config,
            Arc::new(ReadyBackend),
            Arc::new(StaticTab::new("https://www.chess.com/play/online")),
        )
        .start()
    }

    async fn drain_until_complete(app: &mut App) {
        let done = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                app.drain_updates();
                if app.view.is_complete() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(done.is_ok(), "popup never completed");
    }

    #[tokio::test]
    async fn test_activate_fills_view() {
        let (handle, task) = start();
        handle
            .update_move_list(MoveList::from(["1", "e4", "e5", "2", "Nf3", "Nc6"]))
            .await
            .unwrap();

        let mut app = App::new("dark", handle);
        app.activate();
        drain_until_complete(&mut app).await;

        let pairs = app.view.moves.as_ref().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].to_string(), "Nf3 : Nc6");

        task.abort();
    }

    #[tokio::test]
    async fn test_reactivation_resets_view() {
        let (handle, task) = start();
        let mut app = App::new("dark", handle);
        app.activate();
        drain_until_complete(&mut app).await;

        app.activate();
        assert_eq!(app.view, PopupView::default());

        task.abort();
    }

    #[tokio::test]
    async fn test_render_draws_popup() {
        let (handle, task) = start();
        let mut app = App::new("dark", handle);
        app.activate();
        drain_until_complete(&mut app).await;

        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Connected to chess.com"));
        assert!(screen.contains("No moves yet"));

        task.abort();
    }

    #[tokio::test]
    async fn test_keys_quit_or_refresh() {
        let (handle, task) = start();
        let mut app = App::new("dark", handle);
        app.activate();
        drain_until_complete(&mut app).await;

        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Char('r'))), Flow::Continue);
        assert_eq!(app.view, PopupView::default());

        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Char('x'))), Flow::Continue);
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Char('q'))), Flow::Quit);
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Esc)), Flow::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );

        task.abort();
    }

    #[test]
    fn test_screen_guard_drop_without_terminal_is_harmless() {
        // Dropping restores the terminal; outside a tty that must not panic.
        drop(ScreenGuard);
        drop(ScreenGuard);
    }
}
