//! Page-button computation for paginated result sets.
//!
//! [`page_buttons`] is a pure function from (total results, page size,
//! current page) to the ordered row of buttons a pagination control
//! shows: previous/next arrows, page numbers around the current page,
//! the first and last page, and ellipsis markers for skipped ranges.

mod bar;

pub use bar::PaginationBar;

use std::collections::BTreeSet;

/// How many pages to show on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// Label for the previous-page arrow.
pub const PREV_LABEL: &str = "\u{ab}";

/// Label for the next-page arrow.
pub const NEXT_LABEL: &str = "\u{bb}";

/// Label for a skipped-pages marker.
pub const ELLIPSIS_LABEL: &str = "\u{2026}";

/// One button in a pagination row.
///
/// `value` is the page the button navigates to; `None` marks
/// non-interactive buttons (ellipsis markers, disabled arrows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    /// Display label
    pub label: String,

    /// Target page, or `None` when the button does nothing
    pub value: Option<u32>,

    /// Whether this button is the current page
    pub active: bool,
}

impl PageButton {
    fn page(number: u32, active: bool) -> Self {
        Self {
            label: number.to_string(),
            value: Some(number),
            active,
        }
    }

    fn ellipsis() -> Self {
        Self {
            label: ELLIPSIS_LABEL.to_string(),
            value: None,
            active: false,
        }
    }

    fn arrow(label: &str, target: Option<u32>) -> Self {
        Self {
            label: label.to_string(),
            value: target,
            active: false,
        }
    }

    /// Whether the button can be activated at all
    pub fn is_enabled(&self) -> bool {
        self.value.is_some()
    }
}

/// Errors from the pagination calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size must be positive
    #[error("page size must be positive")]
    InvalidPageSize,
}

/// Compute the button row for a result set.
///
/// Returns an empty sequence when everything fits on a single page
/// (callers hide the control entirely). An out-of-range `current_page`
/// is clamped, not rejected.
pub fn page_buttons(
    total_results: u32,
    page_size: u32,
    current_page: u32,
) -> Result<Vec<PageButton>, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::InvalidPageSize);
    }

    let total_pages = total_results.div_ceil(page_size);
    if total_pages <= 1 {
        return Ok(Vec::new());
    }

    let current = current_page.clamp(1, total_pages);

    // First, last, and a window around the current page.
    let mut pages: BTreeSet<u32> = BTreeSet::new();
    pages.insert(1);
    pages.insert(total_pages);
    let window_start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let window_end = current.saturating_add(WINDOW_RADIUS).min(total_pages);
    pages.extend(window_start..=window_end);

    let mut buttons = Vec::with_capacity(pages.len() + 4);
    buttons.push(PageButton::arrow(
        PREV_LABEL,
        (current > 1).then(|| current - 1),
    ));

    let mut previous_page: Option<u32> = None;
    for page in pages {
        if let Some(prev) = previous_page {
            if page - prev >= 2 {
                buttons.push(PageButton::ellipsis());
            }
        }
        buttons.push(PageButton::page(page, page == current));
        previous_page = Some(page);
    }

    buttons.push(PageButton::arrow(
        NEXT_LABEL,
        (current < total_pages).then(|| current + 1),
    ));

    Ok(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(buttons: &[PageButton]) -> Vec<&str> {
        buttons.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_zero_results_is_empty() {
        assert_eq!(page_buttons(0, 20, 1).unwrap(), Vec::new());
    }

    #[test]
    fn test_single_page_is_empty() {
        assert_eq!(page_buttons(20, 20, 1).unwrap(), Vec::new());
        assert_eq!(page_buttons(1, 20, 1).unwrap(), Vec::new());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(
            page_buttons(100, 0, 1).unwrap_err(),
            PaginationError::InvalidPageSize
        );
    }

    #[test]
    fn test_two_pages_first_active() {
        let buttons = page_buttons(21, 20, 1).unwrap();
        assert_eq!(labels(&buttons), vec!["\u{ab}", "1", "2", "\u{bb}"]);

        // previous disabled, next enabled
        assert_eq!(buttons[0].value, None);
        assert_eq!(buttons[3].value, Some(2));

        assert!(buttons[1].active);
        assert_eq!(buttons.iter().filter(|b| b.active).count(), 1);
    }

    #[test]
    fn test_windowed_row_with_ellipses() {
        // 50 pages, current in the middle
        let buttons = page_buttons(1000, 20, 25).unwrap();
        assert_eq!(
            labels(&buttons),
            vec![
                "\u{ab}", "1", "\u{2026}", "23", "24", "25", "26", "27", "\u{2026}", "50",
                "\u{bb}"
            ]
        );

        let active: Vec<_> = buttons.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].value, Some(25));

        // both arrows enabled and carrying the adjacent page
        assert_eq!(buttons.first().unwrap().value, Some(24));
        assert_eq!(buttons.last().unwrap().value, Some(26));
    }

    #[test]
    fn test_current_page_clamped() {
        // 3 pages but current far out of range
        let high = page_buttons(45, 20, 99).unwrap();
        let last = page_buttons(45, 20, 3).unwrap();
        assert_eq!(high, last);

        // clamped low as well
        let low = page_buttons(45, 20, 0).unwrap();
        let first = page_buttons(45, 20, 1).unwrap();
        assert_eq!(low, first);
    }

    #[test]
    fn test_idempotent() {
        let a = page_buttons(777, 20, 13).unwrap();
        let b = page_buttons(777, 20, 13).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_ellipsis_for_adjacent_pages() {
        // 4 pages, current 2: window covers 1..=4, no gaps
        let buttons = page_buttons(80, 20, 2).unwrap();
        assert_eq!(labels(&buttons), vec!["\u{ab}", "1", "2", "3", "4", "\u{bb}"]);
    }

    #[test]
    fn test_gap_of_one_page_gets_ellipsis() {
        // 6 pages, current 5: window is 3..=6, gap between 1 and 3
        let buttons = page_buttons(120, 20, 5).unwrap();
        assert_eq!(
            labels(&buttons),
            vec!["\u{ab}", "1", "\u{2026}", "3", "4", "5", "6", "\u{bb}"]
        );
    }

    #[test]
    fn test_exactly_one_active_across_inputs() {
        for total in [21_u32, 45, 100, 1000] {
            for current in 1..=10_u32 {
                let buttons = page_buttons(total, 20, current).unwrap();
                if buttons.is_empty() {
                    continue;
                }
                assert_eq!(
                    buttons.iter().filter(|b| b.active).count(),
                    1,
                    "total={total} current={current}"
                );
            }
        }
    }

    #[test]
    fn test_last_page_arrows() {
        let buttons = page_buttons(45, 20, 3).unwrap();
        assert_eq!(buttons.first().unwrap().value, Some(2));
        assert_eq!(buttons.last().unwrap().value, None);
    }
}
