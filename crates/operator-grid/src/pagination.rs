//! Page arithmetic and the page-button bar.
//!
//! The bar always starts with page 1, shows a window of two pages back and
//! four pages forward around the current page, and ends with the last page.
//! Gaps are marked with an ellipsis. The asymmetric window is the console's
//! fixed display policy.

/// Pages shown before the current page
pub const WINDOW_BACK: u32 = 2;
/// Pages shown after the current page
pub const WINDOW_FORWARD: u32 = 4;
/// A leading ellipsis appears once the current page is past this one
pub const LEADING_ELLIPSIS_AFTER: u32 = 4;

/// One entry of the page bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(u32),
    Ellipsis,
}

/// `ceil(total_rows / page_size)`; zero rows means zero pages
pub fn total_pages(total_rows: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_rows.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Button layout for `current` out of `total` pages.
///
/// `current` may transiently exceed `total` until the next fetch corrects it;
/// the bar still ends with the last known page.
pub fn page_buttons(current: u32, total: u32) -> Vec<PageButton> {
    if total == 0 {
        return Vec::new();
    }

    let mut buttons = vec![PageButton::Page(1)];
    let mut last = 1;

    let start = current.saturating_sub(WINDOW_BACK).max(1);
    let end = current.saturating_add(WINDOW_FORWARD).min(total);

    if current > LEADING_ELLIPSIS_AFTER && start > 2 {
        buttons.push(PageButton::Ellipsis);
    }

    for page in start.max(last + 1)..=end {
        buttons.push(PageButton::Page(page));
        last = page;
    }

    if last < total {
        if last + 1 < total && buttons.last() != Some(&PageButton::Ellipsis) {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(PageButton::Page(total));
    }

    buttons
}
