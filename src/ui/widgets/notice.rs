//! Message area: last dedupe outcome, overwritten on every run.

use ratatui::{
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::{Notice, NoticeKind};
use crate::ui::theme::styles;

pub fn render(f: &mut Frame, notice: &Notice, area: ratatui::prelude::Rect) {
    let style = match notice.kind {
        NoticeKind::Neutral => styles::text_dim(),
        NoticeKind::Ok => styles::ok(),
        NoticeKind::Error => styles::error(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border());
    let text = if notice.text.is_empty() {
        Paragraph::new("Fill the form and press Enter to run dedupe.").style(styles::muted())
    } else {
        Paragraph::new(notice.text.as_str()).style(style)
    };
    f.render_widget(text.block(block).wrap(Wrap { trim: true }), area);
}
