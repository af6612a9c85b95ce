//! Single-column layout with inner margin for content.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HEADER_HEIGHT, MARGIN_X, MIN_FORM_LINES, NOTICE_HEIGHT, STATUS_HEIGHT};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub form: Rect,
    pub notice: Rect,
    pub status: Rect,
}

fn inset(r: Rect) -> Rect {
    Rect {
        x: r.x + MARGIN_X,
        y: r.y,
        width: r.width.saturating_sub(2 * MARGIN_X),
        height: r.height,
    }
}

pub fn compute(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_FORM_LINES),
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    LayoutRegions {
        header: chunks[0],
        form: inset(chunks[1]),
        notice: inset(chunks[2]),
        status: chunks[3],
    }
}
