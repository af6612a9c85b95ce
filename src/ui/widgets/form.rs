//! Dedupe form: file, mode, keep policy, flags, and the mode-specific column field.

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::{AppState, Field};
use crate::ui::theme::{colors, styles};
use crate::ui::widgets::input;

fn select_value(value: &str) -> Vec<Span<'_>> {
    vec![
        Span::styled("‹ ", styles::muted()),
        Span::styled(value, styles::text()),
        Span::styled(" ›", styles::muted()),
    ]
}

fn toggle_value(on: bool) -> Vec<Span<'static>> {
    let (mark, style) = if on { ("[x]", styles::ok()) } else { ("[ ]", styles::text_dim()) };
    vec![Span::styled(mark, style)]
}

fn value_for(state: &AppState, field: Field) -> Vec<Span<'_>> {
    match field {
        Field::File => input::text_value(&state.file_path, "path/to/sheet.xlsx"),
        Field::Mode => select_value(state.mode.as_str()),
        Field::KeepPolicy => select_value(state.keep_policy.as_str()),
        Field::IgnoreCase => toggle_value(state.ignore_case),
        Field::IgnoreWhitespace => toggle_value(state.ignore_whitespace),
        Field::KeyColumn => input::text_value(&state.key_column, "e.g. Email or C"),
        Field::IgnoreColumns => input::text_value(&state.ignore_columns, "optional, e.g. A,B"),
        Field::ApiBase => Vec::new(),
    }
}

pub fn render(f: &mut Frame, state: &AppState, area: ratatui::prelude::Rect) {
    let block = Block::default()
        .title(" Dedupe ")
        .title_style(styles::accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields: Vec<Field> = state
        .visible_fields()
        .into_iter()
        .filter(|f| *f != Field::ApiBase)
        .collect();
    let lines = fields
        .iter()
        .map(|field| input::row(field.label(), value_for(state, *field), state.focus == *field))
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(lines), inner);

    if let Some(row) = fields.iter().position(|f| *f == state.focus) {
        if let Some(text) = state.text_input(state.focus) {
            input::place_cursor(f, text, inner, inner.y + row as u16);
        }
    }
}
