//! Terminal front end for oilwatch.
//!
//! Hosts the page controllers in a Ratatui app: terminal input and fetch
//! results arrive as [`Message`]s, the page folds them in, and the current
//! page is redrawn.

pub mod app;
pub mod components;
pub mod event;
pub mod pages;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message, spawn_event_reader, spawn_tick_timer, update};
pub use terminal::{Tui, restore_terminal, set_title, setup_terminal};
pub use ui::render;
