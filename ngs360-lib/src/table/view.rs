//! Render output of the table controller.

use crate::pagination::PaginationFooter;
use crate::sorting::SortDirection;

/// One visible header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column id.
    pub column_id: String,
    /// Header text.
    pub label: String,
    /// Current sort direction, when this column is the primary sort.
    pub sort: Option<SortDirection>,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    /// Fixed width in characters.
    pub size: Option<u16>,
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRow {
    /// Caller-requested row ahead of the data (e.g. "go up one level").
    Leading { label: String, colspan: usize },
    /// A data row, one rendered cell per visible column.
    Data { cells: Vec<String> },
    /// Full-width row shown instead of an empty body.
    Placeholder { message: String, colspan: usize },
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Visible header cells in column order.
    pub headers: Vec<HeaderCell>,
    /// Body rows. Never empty.
    pub rows: Vec<ViewRow>,
    /// Pagination footer, absent when the table holds no rows at all.
    pub footer: Option<PaginationFooter>,
}

impl TableView {
    /// Data rows only, skipping leading and placeholder rows.
    pub fn data_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().filter_map(|row| match row {
            ViewRow::Data { cells } => Some(cells.as_slice()),
            _ => None,
        })
    }

    /// Returns `true` if the body shows the empty placeholder.
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row, ViewRow::Placeholder { .. }))
    }
}

/// One entry of the column visibility menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityToggle {
    /// Column id.
    pub column_id: String,
    /// Alias when the column has one, else its header.
    pub label: String,
    /// Whether the column is currently shown.
    pub visible: bool,
}
