//! Column descriptors and row access.

use std::fmt;
use std::sync::Arc;

use super::value::CellValue;

// =============================================================================
// TableRow Trait
// =============================================================================

/// Trait for rows that can be displayed in a table.
///
/// Only [`Accessor::Key`] columns go through `field`; derived columns read
/// the row however they like.
///
/// # Example
///
/// ```
/// use ngs360_lib::{CellValue, TableRow};
///
/// struct Run {
///     id: u32,
///     status: String,
/// }
///
/// impl TableRow for Run {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "id" => self.id.into(),
///             "status" => self.status.as_str().into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Look up a field by key. Unknown keys return [`CellValue::Null`].
    fn field(&self, key: &str) -> CellValue;
}

// =============================================================================
// Accessor
// =============================================================================

/// Reads one value out of a row.
pub trait ColumnAccessor<T> {
    /// Returns the value for this row.
    fn get(&self, row: &T) -> CellValue;
}

type DeriveFn<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
type RenderFn<T> = Arc<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// Either a direct field key or a function deriving a value from the row.
pub enum Accessor<T> {
    /// Direct field lookup through [`TableRow::field`].
    Key(String),
    /// Value computed from the whole row.
    Derived(DeriveFn<T>),
}

impl<T> Accessor<T> {
    /// Creates a direct field accessor.
    pub fn key(key: impl Into<String>) -> Self {
        Accessor::Key(key.into())
    }

    /// Creates a derived accessor.
    pub fn derived(f: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        Accessor::Derived(Arc::new(f))
    }
}

impl<T: TableRow> ColumnAccessor<T> for Accessor<T> {
    fn get(&self, row: &T) -> CellValue {
        match self {
            Accessor::Key(key) => row.field(key),
            Accessor::Derived(f) => f(row),
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Key(key) => Accessor::Key(key.clone()),
            Accessor::Derived(f) => Accessor::Derived(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

// =============================================================================
// ColumnDef
// =============================================================================

/// A table column definition.
pub struct ColumnDef<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text displayed at the top.
    pub header: String,
    /// How the cell value is read from a row.
    pub accessor: Accessor<T>,
    /// Label used by the column visibility toggles instead of the header.
    pub alias: Option<String>,
    /// Custom cell renderer. Defaults to the stringified value.
    pub cell: Option<RenderFn<T>>,
    /// Whether clicking the header sorts by this column.
    pub enable_sorting: bool,
    /// Whether column filters apply to this column.
    pub enable_filtering: bool,
    /// Whether the visibility toggles may hide this column.
    pub enable_hiding: bool,
    /// Fixed width in characters.
    pub size: Option<u16>,
}

impl<T> ColumnDef<T> {
    /// Create a column that reads the row field with the same key as its id.
    pub fn key(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        let accessor = Accessor::Key(id.clone());
        Self::with_accessor(id, header, accessor)
    }

    /// Create a column whose value is derived from the whole row.
    pub fn derived(
        id: impl Into<String>,
        header: impl Into<String>,
        f: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self::with_accessor(id, header, Accessor::derived(f))
    }

    /// Create a column with an explicit accessor.
    pub fn with_accessor(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: Accessor<T>,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor,
            alias: None,
            cell: None,
            enable_sorting: true,
            enable_filtering: true,
            enable_hiding: true,
            size: None,
        }
    }

    /// Set the label shown in the column visibility toggles.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set a custom cell renderer.
    pub fn cell(mut self, f: impl Fn(&CellValue, &T) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(f));
        self
    }

    /// Set whether this column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.enable_sorting = sortable;
        self
    }

    /// Set whether column filters apply to this column.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.enable_filtering = filterable;
        self
    }

    /// Set whether this column can be hidden.
    pub fn hideable(mut self, hideable: bool) -> Self {
        self.enable_hiding = hideable;
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    /// Label for visibility toggles: the alias when set, else the header.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.header)
    }
}

impl<T: TableRow> ColumnDef<T> {
    /// Read this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        self.accessor.get(row)
    }

    /// Render this column's cell for a row.
    ///
    /// `Null` values render as `fallback` unless a custom renderer is set.
    pub fn render_cell(&self, row: &T, fallback: &str) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None if value.is_null() => fallback.to_string(),
            None => value.to_string(),
        }
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            alias: self.alias.clone(),
            cell: self.cell.clone(),
            enable_sorting: self.enable_sorting,
            enable_filtering: self.enable_filtering,
            enable_hiding: self.enable_hiding,
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("alias", &self.alias)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_filtering", &self.enable_filtering)
            .field("enable_hiding", &self.enable_hiding)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
