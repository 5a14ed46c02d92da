//! CSV export.

use crate::error::TableError;
use crate::model::{ColumnDef, TableRow};
use crate::visibility::VisibilityMap;

/// Which columns an export includes.
#[derive(Debug, Clone, Copy)]
pub enum ExportScope<'a> {
    /// Every column, hidden ones included.
    AllColumns,
    /// Only columns visible in the given map.
    VisibleColumns(&'a VisibilityMap),
}

/// Write rows as CSV: one header line of column headers, then one line per
/// row. Cells hold the stringified value, not the display rendering.
pub fn export_csv<'r, T, I>(
    columns: &[ColumnDef<T>],
    rows: I,
    scope: ExportScope<'_>,
) -> Result<String, TableError>
where
    T: TableRow + 'r,
    I: IntoIterator<Item = &'r T>,
{
    let columns: Vec<&ColumnDef<T>> = columns
        .iter()
        .filter(|column| match scope {
            ExportScope::AllColumns => true,
            ExportScope::VisibleColumns(visibility) => visibility.is_visible(&column.id),
        })
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|column| column.header.as_str()))?;

    for row in rows {
        writer.write_record(columns.iter().map(|column| column.value(row).to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::Export(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
