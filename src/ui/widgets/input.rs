//! Labelled form rows and the text cursor.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    Frame,
};

use crate::state::TextInput;
use crate::ui::theme::{colors, styles, LABEL_WIDTH};

const MARKER: &str = "▸ ";

/// `▸ Label            value`, highlighted when focused.
pub fn row<'a>(label: &str, value: Vec<Span<'a>>, focused: bool) -> Line<'a> {
    let (marker, label_style) = if focused {
        (MARKER, styles::accent_bold())
    } else {
        ("  ", styles::text_dim())
    };
    let mut spans = vec![
        Span::styled(marker, styles::accent_bold()),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
    ];
    spans.extend(value);
    let line = Line::from(spans);
    if focused {
        line.style(Style::default().bg(colors::FOCUS_BG))
    } else {
        line
    }
}

pub fn text_value<'a>(input: &'a TextInput, placeholder: &'a str) -> Vec<Span<'a>> {
    if input.value.is_empty() {
        vec![Span::styled(placeholder, styles::muted())]
    } else {
        vec![Span::styled(input.value.as_str(), styles::text())]
    }
}

/// Puts the terminal cursor inside a focused text row starting at `area.x`.
pub fn place_cursor(f: &mut Frame, input: &TextInput, area: Rect, y: u16) {
    let offset = (MARKER.chars().count() + LABEL_WIDTH) as u16;
    let typed = input.value.get(..input.cursor).map(|s| s.chars().count()).unwrap_or(0) as u16;
    let x = (area.x + offset + typed).min(area.x + area.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y });
}
