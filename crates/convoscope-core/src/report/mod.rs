//! Analysis report rendering

mod format;

pub use format::{classify_line, format_report, render_line, LineClass};
