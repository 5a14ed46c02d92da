//! Table state snapshot and pagination mode.

use serde::{Deserialize, Serialize};

use crate::filter::ColumnFilters;
use crate::pagination::PaginationState;
use crate::sorting::SortingState;
use crate::visibility::VisibilityMap;

/// Where pagination, sorting and filtering happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// A remote service computes the page. The supplied rows are already
    /// the current slice, and `total_items` counts rows across all pages.
    Server { total_items: usize },
    /// The full dataset is held locally.
    Client,
}

impl PaginationMode {
    /// Returns `true` for `Server`.
    pub fn is_server_side(&self) -> bool {
        matches!(self, PaginationMode::Server { .. })
    }
}

/// Everything a table's owner may persist or forward to a request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
    /// Current page and page size.
    pub pagination: PaginationState,
    /// Sort entries, only the first is used.
    pub sorting: SortingState,
    /// Free-text query across visible columns.
    pub global_filter: String,
    /// Per-column filters.
    pub column_filters: ColumnFilters,
    /// Per-column visibility.
    pub column_visibility: VisibilityMap,
}
