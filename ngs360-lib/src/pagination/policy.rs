//! Page size menu, effective sizes and displayed counts.
//!
//! Server-paginated tables only ever hold the current page, so the client
//! cannot offer "show all" and must trust the server's total. Client tables
//! hold everything and compute both locally.

use crate::config::TableConfig;

use super::state::PageSize;

/// One entry of the "rows per page" selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeOption {
    /// Size selected by this entry.
    pub size: PageSize,
    /// Text shown for this entry.
    pub label: String,
}

/// Build the "rows per page" menu.
///
/// The configured sizes come first, with the current size merged in (sorted)
/// when it is not already offered. Client tables get a trailing "All"
/// entry; server tables never do.
pub fn page_size_options(
    is_server_side: bool,
    current: PageSize,
    config: &TableConfig,
) -> Vec<PageSizeOption> {
    let mut sizes = config.page_size_options.clone();
    if let Some(n) = current.rows()
        && !sizes.contains(&n)
    {
        sizes.push(n);
    }
    sizes.sort_unstable();
    sizes.dedup();

    let mut options: Vec<PageSizeOption> = sizes
        .into_iter()
        .map(|n| PageSizeOption {
            size: PageSize::Rows(n),
            label: n.to_string(),
        })
        .collect();

    if !is_server_side {
        options.push(PageSizeOption {
            size: PageSize::All,
            label: config.all_label.clone(),
        });
    }

    options
}

/// Label of the selector for the current size.
pub fn page_size_label(size: PageSize, config: &TableConfig) -> String {
    match size {
        PageSize::Rows(n) => n.to_string(),
        PageSize::All => config.all_label.clone(),
    }
}

/// Rows per page after resolving `All` against the filtered row count.
///
/// `All` with nothing to show resolves to 1 so page arithmetic stays
/// defined; the result is never zero.
pub fn effective_page_size(page_size: PageSize, filtered_count: usize) -> usize {
    match page_size {
        PageSize::Rows(n) => n.max(1),
        PageSize::All => filtered_count.max(1),
    }
}

/// Number of pages needed for `total` rows, at least 1.
pub fn page_count(total: usize, effective_size: usize) -> usize {
    total.div_ceil(effective_size.max(1)).max(1)
}

/// Total shown in the footer.
///
/// Server tables always show the authoritative total. Client tables show
/// the filtered count when filtering narrowed the rows, the full count
/// otherwise.
pub fn displayed_total(is_server_side: bool, total_items: usize, filtered_count: usize) -> usize {
    if !is_server_side && filtered_count < total_items {
        filtered_count
    } else {
        total_items
    }
}

/// Rows reported as shown on the current page.
pub fn rows_shown(rows_on_page: usize, rows_after_filtering: usize) -> usize {
    rows_on_page.min(rows_after_filtering)
}
