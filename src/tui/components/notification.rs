//! Success/error banner styling.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Banner kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Success,
    Error,
    Info,
}

impl Variant {
    fn color(self) -> Color {
        match self {
            Variant::Success => Color::Green,
            Variant::Error => Color::Red,
            Variant::Info => Color::Blue,
        }
    }
}

/// Builds a styled span for a banner message.
pub fn span(variant: Variant, message: &str) -> Span<'_> {
    Span::styled(message, Style::default().fg(variant.color()))
}
