//! Width-aware text helpers for terminal output.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| {
        let width = terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Terminal {
            width,
            is_tty: io::stdout().is_terminal(),
        }
    })
}

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Truncate text to fit within `max_width` using unicode-aware widths,
/// appending an ellipsis when truncation occurred.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_c, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Format an article headline for a list row.
pub fn format_title(title: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }
    truncate_with_ellipsis(title, max_width)
}

/// Format the source-and-date meta line under a headline.
pub fn format_meta(source_name: &str, date: &str) -> String {
    match (source_name.is_empty(), date.is_empty()) {
        (false, false) => format!("{} \u{b7} {}", source_name, date),
        (false, true) => source_name.to_string(),
        (true, false) => date.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_basic() {
        assert_eq!(truncate_with_ellipsis("Hello", 10), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_with_ellipsis_edges() {
        assert_eq!(truncate_with_ellipsis("", 10), "");
        assert_eq!(truncate_with_ellipsis("Hello", 0), "");
        assert_eq!(truncate_with_ellipsis("Hello", 1), "...");
    }

    #[test]
    fn test_format_title() {
        assert_eq!(format_title("Hello World", 10), "Hello W...");
        assert_eq!(format_title("Hi", 10), "Hi");
        assert_eq!(format_title("anything", 2), "...");
    }

    #[test]
    fn test_format_meta() {
        assert_eq!(format_meta("Reuters", "2024-05-01"), "Reuters \u{b7} 2024-05-01");
        assert_eq!(format_meta("Reuters", ""), "Reuters");
        assert_eq!(format_meta("", "2024-05-01"), "2024-05-01");
        assert_eq!(format_meta("", ""), "");
    }
}
