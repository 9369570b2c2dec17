//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::App;
use super::components::{book_table, header, order_panel};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Asset header
            Constraint::Min(10),   // Book + order panel
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    header::render(frame, main_layout[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_layout[1]);

    book_table::render(frame, content[0], app);
    order_panel::render(frame, content[1], app);

    header::render_keybindings(frame, main_layout[2], app);
}
