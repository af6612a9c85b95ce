//! Single-panel render: header with API status, dedupe form, message area, status bar.

use ratatui::Frame;

use crate::state::AppState;
use crate::ui::layout;
use crate::ui::theme::SPINNER;
use crate::ui::widgets::{render_form, render_header, render_notice, render_status};

pub fn render(f: &mut Frame, state: &AppState, tick: usize) {
    let regions = layout::compute(f.area());
    let spinner_char = SPINNER[tick % SPINNER.len()];

    render_header(f, state, regions.header);
    render_form(f, state, regions.form);
    render_notice(f, &state.notice, regions.notice);
    render_status(f, regions.status, state, spinner_char);
}
