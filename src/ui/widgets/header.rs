//! Header: title, API status indicator, API base input.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::{ApiHealth, AppState, Field};
use crate::ui::theme::styles;
use crate::ui::widgets::input;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: ratatui::prelude::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border())
        .style(styles::elevated_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = "FixMySheet ";
    let version = format!("(v{VERSION})");
    let status_style = match state.api_status.health {
        ApiHealth::Ok => styles::ok(),
        ApiHealth::Bad => styles::error(),
    };
    let status = state.api_status.text.as_str();
    let used = title.chars().count() + version.chars().count() + status.chars().count() + 1;
    let pad = (inner.width as usize).saturating_sub(used);

    let focused = state.focus == Field::ApiBase;
    let lines = vec![
        Line::from(vec![
            Span::styled(title, styles::accent_bold()),
            Span::styled(version, styles::text_dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(status, status_style),
        ]),
        input::row(
            Field::ApiBase.label(),
            input::text_value(&state.api_base, "https://…"),
            focused,
        ),
    ];
    f.render_widget(Paragraph::new(lines), inner);

    if focused {
        input::place_cursor(f, &state.api_base, inner, inner.y + 1);
    }
}
