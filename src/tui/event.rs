//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use tokio::sync::mpsc;
use tracing::debug;

use crate::controller::{Effect, Loaded, Page};
use crate::runtime::PageId;

use super::app::App;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The mouse moved or was used.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// A fetch started for `page` finished.
    Loaded { page: PageId, loaded: Loaded },
    /// Refresh timer of `page` fired.
    Refresh(PageId),

    /// Request to quit the application.
    Quit,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            let event = match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => Event::Key(key),
                Ok(Some(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                Ok(Some(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(Message::Input(event)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// Returns the effects the page asked for.
pub fn update(app: &mut App, message: Message) -> Vec<Effect> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Loaded { page, loaded } => {
            if app.page_id == Some(page) {
                app.page.apply(loaded);
            } else {
                debug!(%page, "dropping result for a page that is gone");
            }
            Vec::new()
        }
        Message::Refresh(page) => {
            if app.page_id == Some(page) {
                app.page.refresh_tick()
            } else {
                Vec::new()
            }
        }
        Message::Quit => {
            app.should_quit = true;
            Vec::new()
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Vec<Effect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => {
            handle_mouse(app, mouse);
            Vec::new()
        }
        Event::Resize(w, h) => {
            app.resize(w, h);
            Vec::new()
        }
        Event::Tick => {
            app.ticks = app.ticks.wrapping_add(1);
            app.clear_stale_notice();
            Vec::new()
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    // Global keys
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            app.should_quit = true;
            return Vec::new();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return Vec::new();
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_focus();
            } else {
                app.next_focus();
            }
            return Vec::new();
        }
        KeyCode::BackTab => {
            app.previous_focus();
            return Vec::new();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            return Vec::new();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            return Vec::new();
        }
        KeyCode::Left => {
            app.nudge_crosshair(-1);
            return Vec::new();
        }
        KeyCode::Right => {
            app.nudge_crosshair(1);
            return Vec::new();
        }
        KeyCode::Esc => {
            app.crosshair = None;
            app.page.pointer_left();
            return Vec::new();
        }
        KeyCode::Enter => return app.activate().into_iter().collect(),
        KeyCode::Char(c @ '1'..='5') => {
            let n = usize::from(c as u8 - b'1');
            return app.select_timeframe(n);
        }
        _ => {}
    }

    // Page-specific keys
    match &app.page {
        Page::Landing(_) => handle_landing_keys(app, key),
        Page::Detail(_) => handle_detail_keys(app, key),
    }
}

/// Handles keys for the landing page.
fn handle_landing_keys(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('s') => app.cycle_chart_symbol(),
        KeyCode::Char('c') => {
            app.cycle_category(true);
            Vec::new()
        }
        KeyCode::Char('C') => {
            app.cycle_category(false);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Handles keys for the commodity detail page.
fn handle_detail_keys(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    let Page::Detail(page) = &app.page else {
        return Vec::new();
    };
    match key.code {
        KeyCode::Char('h') | KeyCode::Backspace => vec![page.go_home()],
        _ => Vec::new(),
    }
}

/// Drives the chart crosshair from pointer motion over the plot.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
        return;
    }
    let plot = app.chart_plot();
    if plot.contains(Position::new(mouse.column, mouse.row)) {
        let column = mouse.column - plot.x;
        app.crosshair = Some(column);
        app.page.pointer_moved(column);
    } else if app.crosshair.take().is_some() {
        app.page.pointer_left();
    }
}
