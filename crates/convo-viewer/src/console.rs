//! Interactive terminal session.
//!
//! Owns the terminal for the lifetime of the viewer: switches to the
//! alternate screen, starts the first fetch, then redraws on a fixed tick
//! while translating key and mouse input into viewer events. Fetches run
//! on the runtime and report back over a channel, so the loading
//! indicator keeps rendering while a request is in flight.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{Command, Event, Viewer};
use crate::fetch::{ApiClient, FetchError, FetchTarget, Fetched};
use crate::render;

type FetchResult = Result<Fetched, FetchError>;

/// Translate terminal input into a viewer event.
pub fn map_input(input: &TermEvent) -> Option<Event> {
    match input {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        TermEvent::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Event::Quit);
    }

    let event = match key.code {
        KeyCode::Esc => Event::Quit,
        KeyCode::Left => Event::Prev,
        KeyCode::Right => Event::Next,
        KeyCode::Tab => Event::ToggleView,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Event::Quit,
            'h' | 'p' => Event::Prev,
            'l' | 'n' => Event::Next,
            'r' => Event::Refetch,
            'w' => Event::Pan { dx: 0.0, dy: 1.0 },
            's' => Event::Pan { dx: 0.0, dy: -1.0 },
            'a' => Event::Pan { dx: 1.0, dy: 0.0 },
            'd' => Event::Pan { dx: -1.0, dy: 0.0 },
            '+' | '=' => Event::ZoomIn,
            '-' | '_' => Event::ZoomOut,
            _ => return None,
        },
        _ => return None,
    };
    Some(event)
}

fn map_mouse(mouse: &MouseEvent) -> Option<Event> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Event::DragStart { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Event::DragMove { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Event::DragEnd),
        _ => None,
    }
}

/// Start a fetch on the runtime. The result arrives on `tx`.
fn spawn_fetch(client: &ApiClient, target: FetchTarget, tx: mpsc::UnboundedSender<FetchResult>) {
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.fetch(&target).await;
        if tx.send(result).is_err() {
            tracing::debug!(url = target.url(), "Viewer closed before fetch completed");
        }
    });
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run a viewer until the user quits.
pub async fn run_console(mut viewer: Viewer, client: ApiClient) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive viewer requires a terminal (TTY); use --once for plain output."
        ));
    }

    // Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut viewer, &client).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    viewer: &mut Viewer,
    client: &ApiClient,
) -> Result<(), anyhow::Error> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    let tick_rate = Duration::from_millis(100); // ~10fps

    viewer.begin_fetch();
    spawn_fetch(client, viewer.target(), tx.clone());

    loop {
        while let Ok(result) = rx.try_recv() {
            viewer.finish_fetch(result);
        }

        terminal.draw(|frame| render::draw(frame, viewer))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let Some(event) = map_input(&event::read()?) else {
            continue;
        };
        match viewer.update(event) {
            Command::Quit => break,
            Command::Fetch => {
                tracing::info!(url = viewer.target().url(), "Refetch requested");
                spawn_fetch(client, viewer.target(), tx.clone());
            }
            Command::Redraw | Command::None => {}
        }
    }

    Ok(())
}
