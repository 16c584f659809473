//! The interactive event loop: terminal lifecycle, input handling, request
//! dispatch, and settlement draining.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::core::app::App;
use crate::core::request::{RequestOutcome, RequestService};
use crate::ui::rain::RainState;
use crate::ui::renderer;
use crate::utils::logging::LoggingState;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const RAIN_TICK: Duration = Duration::from_millis(80);

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<ChatTerminal, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    Ok(terminal)
}

pub fn restore_terminal(terminal: &mut ChatTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

enum KeyAction {
    Continue,
    Submit,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent, max_offset: u16) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        // Chords with control or alt held are not text input.
        KeyCode::Char(c)
            if key
                .modifiers
                .difference(KeyModifiers::SHIFT)
                .is_empty() =>
        {
            app.input.push(c);
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            app.input.pop();
            KeyAction::Continue
        }
        KeyCode::Up => {
            app.scroll_up(1);
            KeyAction::Continue
        }
        KeyCode::Down => {
            app.scroll_down(1, max_offset);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Applies every settlement waiting on the channel. Each one appends its
/// assistant entry (already classified), logs it, and unmounts the rain.
fn drain_outcomes(
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<(RequestOutcome, u64)>,
    logging: &LoggingState,
    rain: &mut Option<RainState>,
) {
    while let Ok((outcome, request_id)) = rx.try_recv() {
        if let Some(entry) = app.handle_outcome(outcome, request_id) {
            let _ = logging.log_entry(entry);
        }
        if !app.is_busy() {
            *rain = None;
        }
    }
}

pub async fn run_chat(mut app: App, logging: LoggingState) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &logging).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    logging: &LoggingState,
) -> Result<(), Box<dyn Error>> {
    let (service, mut rx) = RequestService::new();
    let mut rain: Option<RainState> = None;
    let mut last_rain_tick = Instant::now();

    loop {
        terminal.draw(|f| renderer::draw(f, app, rain.as_ref()))?;

        let size = terminal.size()?;
        // Offsets are in wrapped rows, the same unit the renderer scrolls by.
        let total_rows = renderer::total_rows(&app.transcript, size.width);
        let max_offset =
            renderer::max_scroll_offset(total_rows, renderer::available_height(size.height));
        // Keep the stored offset in sync while following the bottom, so a
        // manual scroll starts from where the screen actually is.
        if app.auto_scroll {
            app.scroll_offset = max_offset;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key(app, key, max_offset) {
                        KeyAction::Quit => break,
                        KeyAction::Submit => {
                            if let Some(params) = app.submit_input() {
                                if let Some(entry) = app.transcript.last() {
                                    let _ = logging.log_entry(entry);
                                }
                                service.spawn_request(params);
                                rain = Some(RainState::new(
                                    size.width,
                                    renderer::available_height(size.height),
                                ));
                            }
                        }
                        KeyAction::Continue => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(3),
                    MouseEventKind::ScrollDown => app.scroll_down(3, max_offset),
                    _ => {}
                },
                Event::Resize(width, height) => {
                    if let Some(rain) = rain.as_mut() {
                        rain.resize(width, renderer::available_height(height));
                    }
                }
                _ => {}
            }
        }

        drain_outcomes(app, &mut rx, logging, &mut rain);

        if rain.is_some() && last_rain_tick.elapsed() >= RAIN_TICK {
            if let Some(rain) = rain.as_mut() {
                rain.tick();
            }
            last_rain_tick = Instant::now();
        }
    }

    Ok(())
}
