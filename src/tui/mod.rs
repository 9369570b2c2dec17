//! Terminal User Interface for the depth-book viewer.
//!
//! Composes the asset header, two-sided depth table, and order-entry
//! panel, and runs every state change through the `update` reducer in
//! [`event`].

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
