//! What the pagination footer displays.

use std::fmt;

use super::policy::PageSizeOption;

/// Everything the pagination footer needs to render.
///
/// Tables without any rows produce no footer at all. Filters that narrow a
/// populated table to nothing still get one, reading "0 of 0".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationFooter {
    /// One-based number of the current page.
    pub page_number: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Rows on the current page.
    pub rows_shown: usize,
    /// Total row count shown to the user.
    pub displayed_total: usize,
    /// Label of the "rows per page" selector.
    pub page_size_label: String,
    /// Whether a previous page exists.
    pub can_previous: bool,
    /// Whether a next page exists.
    pub can_next: bool,
    /// Entries of the "rows per page" selector.
    pub options: Vec<PageSizeOption>,
}

impl PaginationFooter {
    /// The "Page n of m" text.
    pub fn page_text(&self) -> String {
        format!("Page {} of {}", self.page_number, self.page_count)
    }
}

impl fmt::Display for PaginationFooter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} · {} of {} rows",
            self.page_text(),
            self.rows_shown,
            self.displayed_total
        )
    }
}
