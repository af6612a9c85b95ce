//! Theme: dark canvas, accent for focus, green/red for outcomes.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas.
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, status bar.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Focused field label and cursor.
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const OK: Color = Color::Rgb(0x7c, 0xd9, 0x92);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
    /// Focused row background.
    pub const FOCUS_BG: Color = Color::Rgb(0x1e, 0x2d, 0x3d);
}

pub mod styles {
    use ratatui::style::{Modifier, Style};

    use super::colors;

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }
    pub fn accent_bold() -> Style {
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
    }
    pub fn text() -> Style {
        Style::default().fg(colors::TEXT)
    }
    pub fn text_dim() -> Style {
        Style::default().fg(colors::TEXT_DIM)
    }
    pub fn muted() -> Style {
        Style::default().fg(colors::MUTED)
    }
    pub fn ok() -> Style {
        Style::default().fg(colors::OK).add_modifier(Modifier::BOLD)
    }
    pub fn error() -> Style {
        Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD)
    }
    pub fn elevated_bg() -> Style {
        Style::default().bg(colors::ELEVATED)
    }
}

pub const HEADER_HEIGHT: u16 = 4;
pub const NOTICE_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;
/// Form rows plus borders.
pub const MIN_FORM_LINES: u16 = 9;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
/// Label column width in the form.
pub const LABEL_WIDTH: usize = 20;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
