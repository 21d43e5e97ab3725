//! Pagination bar widget: renders a button row and resolves activations.

use owo_colors::OwoColorize;

use super::{page_buttons, PageButton, PaginationError};

/// A rendered pagination control for one fetch result.
///
/// A fresh bar is constructed per result; there is no in-place update.
/// When the result fits on one page the bar is hidden and renders to an
/// empty string.
#[derive(Debug, Clone)]
pub struct PaginationBar {
    buttons: Vec<PageButton>,
    current_page: u32,
}

impl PaginationBar {
    /// Compute the button row for the given result set.
    pub fn new(
        total_results: u32,
        page_size: u32,
        initial_page: u32,
    ) -> Result<Self, PaginationError> {
        let buttons = page_buttons(total_results, page_size, initial_page)?;
        let current_page = buttons
            .iter()
            .find(|b| b.active)
            .and_then(|b| b.value)
            .unwrap_or(1);
        Ok(Self {
            buttons,
            current_page,
        })
    }

    /// Whether the bar has nothing to show
    pub fn is_hidden(&self) -> bool {
        self.buttons.is_empty()
    }

    /// The button row, in display order
    pub fn buttons(&self) -> &[PageButton] {
        &self.buttons
    }

    /// The page currently marked active (clamped)
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Activate the button at `index`.
    ///
    /// Returns the page to navigate to, or `None` for ellipsis markers,
    /// disabled arrows, out-of-range indices, and the already-active
    /// page. The arrows carry their adjacent page, so no arithmetic
    /// happens here.
    pub fn activate(&self, index: usize) -> Option<u32> {
        let button = self.buttons.get(index)?;
        match button.value {
            Some(value) if value != self.current_page => Some(value),
            _ => None,
        }
    }

    /// Activate the first button with the given label.
    ///
    /// Convenience for line-based input ("3", "«", "»").
    pub fn activate_label(&self, label: &str) -> Option<u32> {
        let index = self.buttons.iter().position(|b| b.label == label)?;
        self.activate(index)
    }

    /// Render the bar as a single line.
    ///
    /// The active page is bracketed so the row stays readable without
    /// color; with `styled` the active page is bold and inert buttons
    /// are dimmed.
    pub fn render(&self, styled: bool) -> String {
        let mut parts = Vec::with_capacity(self.buttons.len());
        for button in &self.buttons {
            let text = if button.active {
                format!("[{}]", button.label)
            } else {
                button.label.clone()
            };
            if styled {
                if button.active {
                    parts.push(text.bold().cyan().to_string());
                } else if button.is_enabled() {
                    parts.push(text);
                } else {
                    parts.push(text.dimmed().to_string());
                }
            } else {
                parts.push(text);
            }
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_for_single_page() {
        let bar = PaginationBar::new(20, 20, 1).unwrap();
        assert!(bar.is_hidden());
        assert_eq!(bar.render(false), "");
    }

    #[test]
    fn test_activate_by_index() {
        // « 1 [2] 3 » for 45 results, page 2
        let bar = PaginationBar::new(45, 20, 2).unwrap();
        assert_eq!(bar.current_page(), 2);

        assert_eq!(bar.activate(0), Some(1)); // previous
        assert_eq!(bar.activate(1), Some(1)); // page 1
        assert_eq!(bar.activate(2), None); // active page
        assert_eq!(bar.activate(3), Some(3)); // page 3
        assert_eq!(bar.activate(4), Some(3)); // next
        assert_eq!(bar.activate(99), None); // out of range
    }

    #[test]
    fn test_activate_disabled_arrow() {
        let bar = PaginationBar::new(45, 20, 1).unwrap();
        assert_eq!(bar.activate(0), None); // previous disabled on page 1
    }

    #[test]
    fn test_activate_ellipsis() {
        let bar = PaginationBar::new(1000, 20, 25).unwrap();
        let ellipsis = bar
            .buttons()
            .iter()
            .position(|b| b.label == super::super::ELLIPSIS_LABEL)
            .unwrap();
        assert_eq!(bar.activate(ellipsis), None);
    }

    #[test]
    fn test_activate_label() {
        let bar = PaginationBar::new(45, 20, 2).unwrap();
        assert_eq!(bar.activate_label("\u{ab}"), Some(1));
        assert_eq!(bar.activate_label("\u{bb}"), Some(3));
        assert_eq!(bar.activate_label("2"), None);
        assert_eq!(bar.activate_label("7"), None);
    }

    #[test]
    fn test_render_plain() {
        let bar = PaginationBar::new(45, 20, 2).unwrap();
        assert_eq!(bar.render(false), "\u{ab} 1 [2] 3 \u{bb}");
    }

    #[test]
    fn test_clamped_initial_page() {
        let bar = PaginationBar::new(45, 20, 99).unwrap();
        assert_eq!(bar.current_page(), 3);
    }
}
