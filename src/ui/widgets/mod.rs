//! TUI widgets: header, dedupe form, message area, status bar.

mod form;
mod header;
mod input;
mod notice;
mod status;

pub use form::render as render_form;
pub use header::render as render_header;
pub use notice::render as render_notice;
pub use status::render as render_status;
