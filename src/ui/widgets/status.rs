//! Bottom bar: request activity on the left, keys for the focused field on the right.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{AppState, Field};
use crate::ui::theme::styles;

fn activity(in_flight: usize, spinner_char: char) -> String {
    match in_flight {
        0 => " Ready".to_string(),
        1 => format!(" {spinner_char} 1 request in flight"),
        n => format!(" {spinner_char} {n} requests in flight"),
    }
}

fn hints(focus: Field) -> &'static str {
    if focus == Field::ApiBase {
        " Enter save & check  Tab next  Esc quit "
    } else if focus.is_toggle() {
        " Space toggle  Enter dedupe  ^R check API  Esc quit "
    } else if focus.is_select() {
        " ←→ change  Enter dedupe  ^R check API  Esc quit "
    } else {
        " Enter dedupe  ^L clear  ^R check API  Esc quit "
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState, spinner_char: char) {
    let left = activity(state.in_flight, spinner_char);
    let right = hints(state.focus);
    let pad = (area.width as usize).saturating_sub(left.chars().count() + right.chars().count());

    let left_style = if state.loading() { styles::accent_bold() } else { styles::muted() };
    let line = Line::from(vec![
        Span::styled(left, left_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, styles::muted()),
    ]);
    f.render_widget(Paragraph::new(line).style(styles::elevated_bg()), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_counts_requests() {
        assert_eq!(activity(0, '⠋'), " Ready");
        assert_eq!(activity(1, '⠋'), " ⠋ 1 request in flight");
        assert_eq!(activity(3, '⠙'), " ⠙ 3 requests in flight");
    }

    #[test]
    fn enter_hint_follows_focus() {
        assert!(hints(Field::ApiBase).contains("Enter save & check"));
        assert!(hints(Field::File).contains("Enter dedupe"));
        assert!(hints(Field::IgnoreCase).contains("Space toggle"));
        assert!(hints(Field::Mode).contains("←→ change"));
    }
}
