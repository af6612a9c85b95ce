//! App state: API base field, dedupe form, status indicator, message area.

use std::path::Path;

use crate::backend::HealthResponse;
use crate::dedupe::{DedupeForm, DedupeMode, KeepPolicy};
use crate::error::ClientError;

/// Focusable form fields, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    ApiBase,
    File,
    Mode,
    KeepPolicy,
    IgnoreCase,
    IgnoreWhitespace,
    KeyColumn,
    IgnoreColumns,
}

impl Field {
    const ORDER: [Field; 8] = [
        Field::ApiBase,
        Field::File,
        Field::Mode,
        Field::KeepPolicy,
        Field::IgnoreCase,
        Field::IgnoreWhitespace,
        Field::KeyColumn,
        Field::IgnoreColumns,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::ApiBase => "API base",
            Field::File => "File",
            Field::Mode => "Mode",
            Field::KeepPolicy => "Keep policy",
            Field::IgnoreCase => "Ignore case",
            Field::IgnoreWhitespace => "Ignore whitespace",
            Field::KeyColumn => "Key column",
            Field::IgnoreColumns => "Ignore columns",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            Field::ApiBase | Field::File | Field::KeyColumn | Field::IgnoreColumns
        )
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, Field::IgnoreCase | Field::IgnoreWhitespace)
    }

    pub fn is_select(self) -> bool {
        matches!(self, Field::Mode | Field::KeepPolicy)
    }
}

/// Ok/bad styling for the status indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiHealth {
    Ok,
    Bad,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiStatus {
    pub health: ApiHealth,
    pub text: String,
}

impl ApiStatus {
    pub fn checking() -> Self {
        Self { health: ApiHealth::Bad, text: "API: checking…".into() }
    }

    pub fn from_result(result: &Result<HealthResponse, ClientError>) -> Self {
        match result {
            Ok(h) => Self { health: ApiHealth::Ok, text: format!("API: OK ({})", h.label()) },
            Err(e) => Self { health: ApiHealth::Bad, text: format!("API: ERROR ({})", e) },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Neutral,
    Ok,
    Error,
}

/// The single dedupe message area; each write replaces the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Neutral, text: text.into() }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Ok, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn running() -> Self {
        Self::neutral("Running dedupe…")
    }

    /// Validation failures are shown as-is; request failures get an `Error:` prefix.
    pub fn from_error(err: &ClientError) -> Self {
        match err {
            ClientError::Validation(v) => Self::error(v.to_string()),
            other => Self::error(format!("Error: {}", other)),
        }
    }

    pub fn saved(path: &Path) -> Self {
        Self::ok(format!("Done. Saved to {}", path.display()))
    }
}

/// Single-line text input with a byte cursor.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn insert(&mut self, c: char) {
        let pos = self.cursor.min(self.value.len());
        self.value.insert(pos, c);
        self.cursor = pos + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        let pos = self.cursor.min(self.value.len());
        if let Some(prev) = self.value[..pos].chars().next_back() {
            let start = pos - prev.len_utf8();
            self.value.remove(start);
            self.cursor = start;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Everything the renderer reads.
#[derive(Clone, Debug)]
pub struct AppState {
    pub api_base: TextInput,
    pub file_path: TextInput,
    pub mode: DedupeMode,
    pub keep_policy: KeepPolicy,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub key_column: TextInput,
    pub ignore_columns: TextInput,
    pub focus: Field,
    pub api_status: ApiStatus,
    pub notice: Notice,
    /// Requests started but not yet reported back.
    pub in_flight: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api_base: TextInput::default(),
            file_path: TextInput::default(),
            mode: DedupeMode::Column,
            keep_policy: KeepPolicy::default(),
            ignore_case: false,
            ignore_whitespace: false,
            key_column: TextInput::default(),
            ignore_columns: TextInput::default(),
            focus: Field::ApiBase,
            api_status: ApiStatus::checking(),
            notice: Notice::default(),
            in_flight: 0,
        }
    }
}

impl AppState {
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Key column only shows in column mode, ignore columns only in row mode.
    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::KeyColumn => self.mode == DedupeMode::Column,
            Field::IgnoreColumns => self.mode == DedupeMode::Row,
            _ => true,
        }
    }

    pub fn visible_fields(&self) -> Vec<Field> {
        Field::ORDER.iter().copied().filter(|f| self.is_visible(*f)).collect()
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.visible_fields().len();
        self.step_focus(len.saturating_sub(1));
    }

    fn step_focus(&mut self, by: usize) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + by) % fields.len()];
    }

    pub fn text_input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::ApiBase => Some(&self.api_base),
            Field::File => Some(&self.file_path),
            Field::KeyColumn => Some(&self.key_column),
            Field::IgnoreColumns => Some(&self.ignore_columns),
            _ => None,
        }
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Field::ApiBase => Some(&mut self.api_base),
            Field::File => Some(&mut self.file_path),
            Field::KeyColumn => Some(&mut self.key_column),
            Field::IgnoreColumns => Some(&mut self.ignore_columns),
            _ => None,
        }
    }

    /// Flips a checkbox, or steps a select forward or back.
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            Field::Mode => self.mode = cycle(&DedupeMode::ALL, self.mode, forward),
            Field::KeepPolicy => self.keep_policy = cycle(&KeepPolicy::ALL, self.keep_policy, forward),
            Field::IgnoreCase => self.ignore_case = !self.ignore_case,
            Field::IgnoreWhitespace => self.ignore_whitespace = !self.ignore_whitespace,
            _ => {}
        }
    }

    pub fn dedupe_form(&self) -> DedupeForm {
        DedupeForm {
            mode: self.mode.as_str().to_string(),
            keep_policy: self.keep_policy.as_str().to_string(),
            ignore_case: self.ignore_case,
            ignore_whitespace: self.ignore_whitespace,
            key_column: self.key_column.value.clone(),
            ignore_columns: self.ignore_columns.value.clone(),
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward { idx + 1 } else { idx + all.len() - 1 };
    all[next % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn focus_skips_fields_hidden_by_mode() {
        let mut state = AppState { focus: Field::IgnoreWhitespace, ..AppState::default() };
        state.focus_next();
        assert_eq!(state.focus, Field::KeyColumn);
        state.focus_next();
        assert_eq!(state.focus, Field::ApiBase);

        state.mode = DedupeMode::Row;
        state.focus = Field::IgnoreWhitespace;
        state.focus_next();
        assert_eq!(state.focus, Field::IgnoreColumns);
        state.focus_prev();
        assert_eq!(state.focus, Field::IgnoreWhitespace);
    }

    #[test]
    fn cycling_mode_wraps_both_ways() {
        let mut state = AppState { focus: Field::Mode, ..AppState::default() };
        state.cycle_focused(true);
        assert_eq!(state.mode, DedupeMode::Row);
        state.cycle_focused(true);
        assert_eq!(state.mode, DedupeMode::Column);

        state.focus = Field::KeepPolicy;
        state.cycle_focused(false);
        assert_eq!(state.keep_policy, KeepPolicy::KeepLast);
    }

    #[test]
    fn text_input_edits_multibyte_chars() {
        let mut input = TextInput::new("ab");
        input.insert('é');
        assert_eq!(input.value, "abé");
        input.backspace();
        input.backspace();
        assert_eq!(input.value, "a");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn notice_prefixes_request_errors_only() {
        let invalid = Notice::from_error(&ValidationError::MissingFile.into());
        assert_eq!(invalid, Notice::error("Please select a file."));

        let server = Notice::from_error(&ClientError::Server { status: 400, message: "bad file".into() });
        assert_eq!(server.text, "Error: bad file");
        assert_eq!(server.kind, NoticeKind::Error);
    }

    #[test]
    fn api_status_reflects_health_result() {
        let ok = ApiStatus::from_result(&Ok(HealthResponse { status: None }));
        assert_eq!(ok, ApiStatus { health: ApiHealth::Ok, text: "API: OK (running)".into() });

        let bad = ApiStatus::from_result(&Err(ClientError::Transport("connection refused".into())));
        assert_eq!(bad.health, ApiHealth::Bad);
        assert_eq!(bad.text, "API: ERROR (connection refused)");
    }
}
