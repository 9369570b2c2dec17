//! Two-sided depth table.
//!
//! Both sides of the view model are ascending by price; this component
//! chooses the reading order: bids best-to-worst (descending), asks
//! best-to-worst (ascending). Price cells are the activation target.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::models::orderbook::OrderbookRow;
use crate::numeric::{format_price, format_quantity};
use crate::tui::app::{App, BookColumn, Focus};

use super::notification;

/// Renders the depth table pane.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Book;
    let block = Block::default()
        .title(format!(" Order Book ({}) ", app.asset))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(book) = &app.orderbook else {
        let text = if app.book_loading {
            "Loading orderbook..."
        } else {
            "No order book data"
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        if let Some(message) = &app.book_error {
            render_fetch_error(frame, inner, message);
        }
        return;
    };

    let mut content = inner;
    if let Some(message) = &app.book_error {
        // Error banner above the tables; the stale book stays visible.
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(inner);
        render_fetch_error(frame, split[0], message);
        content = split[1];
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content);

    // Bids read best-to-worst: reverse the ascending rows.
    let bid_rows: Vec<&OrderbookRow> = book.bids.rows.iter().rev().collect();
    let ask_rows: Vec<&OrderbookRow> = book.asks.rows.iter().collect();

    render_side(frame, halves[0], app, BookColumn::Bids, &bid_rows);
    render_side(frame, halves[1], app, BookColumn::Asks, &ask_rows);
}

fn render_side(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    column: BookColumn,
    rows: &[&OrderbookRow],
) {
    let (title, price_color) = match column {
        BookColumn::Bids => ("Bid Price", Color::Green),
        BookColumn::Asks => ("Ask Price", Color::Red),
    };

    let selected =
        (app.focus == Focus::Book && app.selection.column == column).then_some(app.selection.index);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if selected == Some(i) {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format_price(row.price)).style(style.fg(price_color)),
                Cell::from(format_quantity(row.quantity)).style(style),
                Cell::from(format_price(row.total)).style(style),
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ],
    )
    .header(
        Row::new(vec![title, "Quantity", "Total"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(table, area);
}

fn render_fetch_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(notification::span(notification::Variant::Error, message));
    frame.render_widget(Paragraph::new(line), area);
}
