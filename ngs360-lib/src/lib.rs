//! NGS360 table core
//!
//! Headless state and policy for the console's paginated, sortable and
//! filterable data tables. Rows come in from a data-fetching collaborator,
//! change notifications go out to the page that owns the request. Nothing
//! in this crate performs I/O.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod params;
pub mod sorting;
pub mod table;
pub mod visibility;
pub mod wizard;

pub use config::TableConfig;
pub use filter::{matches, ColumnFilter, ColumnFilters, FilterOperator};
pub use model::{Accessor, CellValue, ColumnAccessor, ColumnDef, TableRow};
pub use pagination::{PageSize, PaginationFooter, PaginationState};
pub use sorting::{ColumnSort, SortDirection, SortingState};
pub use table::{PaginationMode, TableController, TableEvent, TableState, TableView};
pub use visibility::{ColumnVisibilityStore, VisibilityMap};
