//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background fetch results, shutdown signals and
//! a housekeeping tick.

use crate::app::{App, AppEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Status expiry is checked this often.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Result of handling a key press.
pub enum Action {
    Continue,
    Quit,
}

/// SIGINT/SIGTERM listener. Never fires on non-Unix targets.
struct ShutdownSignals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignals {
    fn install() -> Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                interrupt: signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?,
                terminate: signal(SignalKind::terminate())
                    .context("Failed to listen for SIGTERM")?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Resolve with the name of the signal received.
    async fn recv(&mut self) -> &'static str {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.interrupt.recv() => "SIGINT",
                _ = self.terminate.recv() => "SIGTERM",
            }
        }
        #[cfg(not(unix))]
        {
            std::future::pending().await
        }
    }
}

/// Run the TUI until the user quits, a signal arrives or input closes.
///
/// Drawing happens only when something marked the app dirty. A panic hook
/// puts the terminal back before the default hook prints.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    install_panic_hook();

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let mut signals = ShutdownSignals::install()?;
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    loop {
        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Fetch results queued while we were drawing go first.
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(app, event, &event_tx);
            app.needs_redraw = true;
        }

        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            biased;

            name = signals.recv() => {
                tracing::info!(signal = name, "Shutting down");
                break;
            }

            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.needs_redraw = true;
                    match handle_input(app, key.code, key.modifiers, &event_tx) {
                        Ok(Action::Quit) => break,
                        Ok(Action::Continue) => {}
                        Err(e) => app.set_status(format!("Error: {}", e)),
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    tracing::debug!(width, height, "Terminal resized");
                    app.needs_redraw = true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::warn!(error = %e, "Terminal event stream error"),
                None => {
                    tracing::info!("Terminal event stream closed");
                    break;
                }
            },

            Some(event) = event_rx.recv() => {
                handle_app_event(app, event, &event_tx);
                app.needs_redraw = true;
            }

            _ = tick.tick() => {}
        }
    }

    restore_terminal(&mut terminal)
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        previous(info);
    }));
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
