//! Order-entry panel: side selector, numeric inputs, submit state, and
//! the form's notification banners.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::form::FormField;
use crate::models::Side;
use crate::tui::app::{App, Focus};
use crate::tui::input::TextInput;

use super::notification::{self, Variant};

/// Renders the order-entry pane.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let in_panel = matches!(app.focus, Focus::SideSelect | Focus::Field(_));
    let block = Block::default()
        .title(" Order Entry ")
        .borders(Borders::ALL)
        .border_style(if in_panel {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Side
            Constraint::Length(2), // Price + error
            Constraint::Length(2), // Quantity + error
            Constraint::Length(2), // Notional + error
            Constraint::Length(1), // Submit state
            Constraint::Min(2),    // Banners
        ])
        .split(inner);

    render_side_select(frame, rows[0], app);
    render_field(frame, rows[1], app, FormField::Price, "Price");
    render_field(frame, rows[2], app, FormField::Quantity, "Quantity");
    render_field(frame, rows[3], app, FormField::Notional, "Notional (price x qty)");
    render_submit_state(frame, rows[4], app);
    render_banners(frame, rows[5], app);
}

fn render_side_select(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::SideSelect;
    let side = app.form.state.side;

    let mut spans = vec![Span::styled(
        "Side: ",
        label_style(is_focused),
    )];
    for option in [Side::Buy, Side::Sell] {
        let mut style = Style::default().fg(match option {
            Side::Buy => Color::Green,
            Side::Sell => Color::Red,
        });
        if option == side {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {option} "), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_field(frame: &mut Frame, area: Rect, app: &App, field: FormField, label: &str) {
    let is_focused = app.focus == Focus::Field(field);
    let input: &TextInput = app.inputs.get(field);
    let field_error = app.form.field_error(field);

    let value_style = if field_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{label}: "), label_style(is_focused)),
        Span::styled(input.as_str().to_string(), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), Rect { height: 1, ..area });

    if is_focused {
        let cursor_x = area.x + label.len() as u16 + 2 + input.cursor as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
    }

    if let Some(message) = field_error
        && area.height > 1
    {
        let error_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Line::from(notification::span(Variant::Error, &message))),
            error_area,
        );
    }
}

fn render_submit_state(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.form.submitting {
        (
            "Submitting...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ Place Limit Order ]", Style::default().add_modifier(Modifier::BOLD))
    };
    frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
}

fn render_banners(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if let Some(message) = &app.form.success {
        lines.push(Line::from(notification::span(Variant::Success, message)));
    }
    if let Some(message) = &app.form.error {
        lines.push(Line::from(notification::span(Variant::Error, message)));
    }
    if lines.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
