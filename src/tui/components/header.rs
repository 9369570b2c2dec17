//! Asset header and keybindings bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Asset;
use crate::tui::app::{App, Focus};

/// Renders the top bar: selected asset and book status.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " Order Book ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for asset in [Asset::Btc, Asset::Eth] {
        let style = if asset == app.asset {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {asset} "), style));
        spans.push(Span::raw(" "));
    }

    if app.book_loading && app.orderbook.is_none() {
        spans.push(Span::styled(
            "loading...",
            Style::default().fg(Color::DarkGray),
        ));
    } else if let Some(book) = &app.orderbook {
        spans.push(Span::styled(
            format!("update #{}", book.last_updated_id),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the bottom keybindings help line for the current focus.
pub fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.focus {
        Focus::Book => {
            " ↑/↓ row  ←/→ side  Enter: prefill+submit  a: asset  r: refresh  Tab: form  q: quit "
        }
        Focus::SideSelect => " b/s or Space: side  Enter: place order  Tab: next  Esc: book ",
        Focus::Field(_) => " type a value  Enter: place order  Tab: next field  Esc: book ",
    };
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
