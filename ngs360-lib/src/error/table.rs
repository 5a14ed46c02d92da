//! TableError for controller, configuration and export operations

use std::string::FromUtf8Error;

/// Errors returned when a caller asks the table for something it cannot do.
///
/// Filtering, sorting and rendering never fail; these only surface at the
/// API edge.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A numeric page size of zero was requested.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// "Show all" was requested on a server-paginated table.
    #[error("'All' page size is not available for server-paginated tables")]
    ShowAllUnavailable,

    /// The column id does not match any column descriptor.
    #[error("Column '{0}' not found in table")]
    UnknownColumn(String),

    /// The configuration parsed but holds unusable values.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),

    /// The configuration could not be parsed.
    #[error("table configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Writing CSV failed.
    #[error("csv export error: {0}")]
    Export(#[from] csv::Error),

    /// The CSV writer produced bytes that are not UTF-8.
    #[error("csv export produced invalid UTF-8: {0}")]
    ExportEncoding(#[from] FromUtf8Error),
}

impl TableError {
    /// Creates a new unknown column error.
    pub fn unknown_column(column_id: impl Into<String>) -> Self {
        Self::UnknownColumn(column_id.into())
    }
}
