//! Table controller.

use std::collections::BTreeSet;

use log::{debug, trace, warn};

use crate::config::TableConfig;
use crate::error::TableError;
use crate::export::{export_csv, ExportScope};
use crate::filter::{matches, matches_global, ColumnFilter};
use crate::model::{ColumnDef, TableRow};
use crate::pagination::{
    displayed_total, effective_page_size, page_count, page_size_label, page_size_options,
    rows_shown, PageSize, PaginationFooter, PaginationState,
};
use crate::sorting::{sort_rows, SortCycle, SortingState};
use crate::visibility::ColumnVisibilityStore;

use super::events::{EventHandlers, EventResult, TableEvent};
use super::state::{PaginationMode, TableState};
use super::view::{HeaderCell, TableView, ViewRow, VisibilityToggle};

/// Binds rows and columns to sort, filter, pagination and visibility state.
///
/// In [`PaginationMode::Server`] the controller never sorts, filters or
/// slices. Interactions only emit [`TableEvent`]s describing the state the
/// owner should request next; the owner re-fetches and hands back the new
/// rows, total and state. In [`PaginationMode::Client`] the controller owns
/// that state and applies interactions itself, emitting the same events.
///
/// Column visibility is applied in both modes and written through to the
/// bound [`ColumnVisibilityStore`], if any.
///
/// # Example
///
/// ```
/// use ngs360_lib::{CellValue, ColumnDef, PaginationMode, TableController, TableRow};
///
/// struct Run {
///     id: u32,
///     status: &'static str,
/// }
///
/// impl TableRow for Run {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "id" => self.id.into(),
///             "status" => self.status.into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
///
/// let mut table = TableController::new(
///     vec![ColumnDef::key("id", "ID"), ColumnDef::key("status", "Status")],
///     PaginationMode::Client,
/// )
/// .with_rows(vec![Run { id: 1, status: "Succeeded" }, Run { id: 2, status: "Failed" }]);
///
/// table.set_global_filter("fail");
/// assert_eq!(table.filtered_rows().len(), 1);
/// ```
pub struct TableController<T> {
    columns: Vec<ColumnDef<T>>,
    rows: Vec<T>,
    mode: PaginationMode,
    state: TableState,
    config: TableConfig,
    sort_cycle: SortCycle,
    visibility_store: Option<(ColumnVisibilityStore, String)>,
    leading_row: Option<String>,
    handlers: EventHandlers,
}

impl<T: TableRow> TableController<T> {
    /// Create a controller with default state.
    pub fn new(columns: Vec<ColumnDef<T>>, mode: PaginationMode) -> Self {
        let config = TableConfig::default();
        let mut state = TableState::default();
        state.pagination.page_size = PageSize::Rows(config.default_page_size);

        Self {
            columns,
            rows: Vec::new(),
            mode,
            state,
            config,
            sort_cycle: SortCycle::new(),
            visibility_store: None,
            leading_row: None,
            handlers: EventHandlers::default(),
        }
    }

    /// Use the given configuration. Resets the page size to its default.
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.state.pagination = PaginationState::new(0, PageSize::Rows(config.default_page_size));
        self.config = config;
        self
    }

    /// Set the initial rows.
    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Bind column visibility to a store entry, loading what it holds.
    pub fn with_visibility(mut self, store: ColumnVisibilityStore, key: impl Into<String>) -> Self {
        let key = key.into();
        self.state.column_visibility = store.get(&key);
        self.visibility_store = Some((store, key));
        self
    }

    /// Render a leading row with this label ahead of the data rows.
    pub fn with_leading_row(mut self, label: impl Into<String>) -> Self {
        self.leading_row = Some(label.into());
        self
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the rows.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if !self.is_server_side() {
            self.clamp_page();
        }
    }

    /// Replace the column descriptors.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) {
        self.columns = columns;
    }

    /// Update the authoritative row count of a server-paginated table.
    ///
    /// Ignored for client-paginated tables, which count their own rows.
    pub fn set_total_items(&mut self, total: usize) {
        if let PaginationMode::Server { total_items } = &mut self.mode {
            *total_items = total;
        }
    }

    /// Replace the whole state.
    ///
    /// Server-paginated owners call this with the state they actually
    /// requested. Column filters are normalized on the way in.
    pub fn set_state(&mut self, mut state: TableState) -> Result<(), TableError> {
        self.check_page_size(state.pagination.page_size)?;
        state.column_filters = state.column_filters.normalized();
        self.state = state;

        if let Some((store, key)) = &self.visibility_store {
            store.set(key, self.state.column_visibility.clone());
        }
        if !self.is_server_side() {
            self.clamp_page();
        }
        Ok(())
    }

    /// Register a handler for state change events.
    ///
    /// Handlers run synchronously, in registration order, as interactions
    /// happen.
    pub fn subscribe(&mut self, handler: impl FnMut(&TableEvent) + 'static) {
        self.handlers.push(handler);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Pagination mode.
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Returns `true` for server-paginated tables.
    pub fn is_server_side(&self) -> bool {
        self.mode.is_server_side()
    }

    /// Configuration in use.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All rows as supplied.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// All column descriptors, hidden ones included.
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Find a column by id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Columns currently shown.
    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns
            .iter()
            .filter(|c| self.state.column_visibility.is_visible(&c.id))
            .collect()
    }

    /// Entries of the column visibility menu, one per hideable column.
    pub fn visibility_toggles(&self) -> Vec<VisibilityToggle> {
        self.columns
            .iter()
            .filter(|c| c.enable_hiding)
            .map(|c| VisibilityToggle {
                column_id: c.id.clone(),
                label: c.label().to_string(),
                visible: self.state.column_visibility.is_visible(&c.id),
            })
            .collect()
    }

    /// Row count across all pages.
    ///
    /// The caller-supplied total for server tables, the number of supplied
    /// rows for client tables.
    pub fn total_items(&self) -> usize {
        match self.mode {
            PaginationMode::Server { total_items } => total_items,
            PaginationMode::Client => self.rows.len(),
        }
    }

    // -------------------------------------------------------------------------
    // Derived rows
    // -------------------------------------------------------------------------

    /// Rows after global and column filters, sorted by the primary sort.
    ///
    /// Server tables return their rows untouched.
    pub fn filtered_rows(&self) -> Vec<&T> {
        if self.is_server_side() {
            return self.rows.iter().collect();
        }

        let mut rows: Vec<&T> = self.rows.iter().filter(|row| self.row_passes(row)).collect();

        if let Some(sort) = self.state.sorting.primary()
            && let Some(column) = self.column(&sort.column_id)
            && column.enable_sorting
        {
            sort_rows(&mut rows, column, sort.desc);
        }

        rows
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        let filtered = self.filtered_rows();
        self.slice_page(filtered)
    }

    /// Rows per page with `All` resolved against the filtered count.
    pub fn effective_page_size(&self) -> usize {
        effective_page_size(self.state.pagination.page_size, self.filtered_len())
    }

    /// Number of pages, at least 1.
    pub fn page_count(&self) -> usize {
        let filtered = self.filtered_len();
        let size = effective_page_size(self.state.pagination.page_size, filtered);
        match self.mode {
            PaginationMode::Server { total_items } => page_count(total_items, size),
            PaginationMode::Client => page_count(filtered, size),
        }
    }

    /// Distinct non-empty values of a column across all rows, sorted.
    ///
    /// These are the choices of a select-style column filter.
    pub fn column_filter_options(&self, column_id: &str) -> Result<Vec<String>, TableError> {
        let column = self
            .column(column_id)
            .ok_or_else(|| TableError::unknown_column(column_id))?;

        let values: BTreeSet<String> = self
            .rows
            .iter()
            .map(|row| column.value(row).to_string())
            .filter(|value| !value.is_empty())
            .collect();

        Ok(values.into_iter().collect())
    }

    /// Export the filtered, sorted rows (all pages) as CSV.
    ///
    /// Hidden columns are included when `include_hidden` is set.
    pub fn export_csv(&self, include_hidden: bool) -> Result<String, TableError> {
        let scope = if include_hidden {
            ExportScope::AllColumns
        } else {
            ExportScope::VisibleColumns(&self.state.column_visibility)
        };
        export_csv(&self.columns, self.filtered_rows(), scope)
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Change the global filter. Resets to the first page.
    pub fn set_global_filter(&mut self, text: impl Into<String>) -> EventResult {
        let text = text.into();
        if text == self.state.global_filter {
            return EventResult::Ignored;
        }

        let mut next = self.state.clone();
        next.global_filter = text.clone();
        next.pagination = next.pagination.first_page();

        let events = vec![
            TableEvent::FilterChanged(text),
            TableEvent::PaginationChanged(next.pagination),
        ];
        self.commit(next, events)
    }

    /// Set or clear one column's filter. Resets to the first page.
    ///
    /// Columns with filtering disabled ignore the request.
    pub fn set_column_filter(
        &mut self,
        column_id: &str,
        filter: Option<ColumnFilter>,
    ) -> EventResult {
        match self.column(column_id).map(|c| c.enable_filtering) {
            Some(true) => {}
            Some(false) => return EventResult::Ignored,
            None => {
                warn!("Ignoring filter on unknown column '{}'", column_id);
                return EventResult::Ignored;
            }
        }

        let mut next = self.state.clone();
        if !next.column_filters.set(column_id, filter) {
            return EventResult::Ignored;
        }
        next.pagination = next.pagination.first_page();

        let events = vec![
            TableEvent::ColumnFiltersChanged(next.column_filters.clone()),
            TableEvent::PaginationChanged(next.pagination),
        ];
        self.commit(next, events)
    }

    /// Handle a click on a column header.
    ///
    /// Each column cycles ascending, descending, cleared. Client tables
    /// also return to the first page.
    pub fn click_sort_header(&mut self, column_id: &str) -> EventResult {
        match self.column(column_id).map(|c| c.enable_sorting) {
            Some(true) => {}
            Some(false) => return EventResult::Ignored,
            None => {
                warn!("Ignoring sort on unknown column '{}'", column_id);
                return EventResult::Ignored;
            }
        }

        let direction = self.sort_cycle.click(column_id);
        let mut next = self.state.clone();
        next.sorting = match direction {
            Some(direction) => SortingState::single(column_id, direction.is_desc()),
            None => SortingState::none(),
        };

        let mut events = vec![TableEvent::SortingChanged(next.sorting.clone())];
        if !self.is_server_side() && next.pagination.page_index != 0 {
            next.pagination = next.pagination.first_page();
            events.push(TableEvent::PaginationChanged(next.pagination));
        }
        self.commit(next, events)
    }

    /// Go to a page, clamped to the available pages.
    pub fn go_to_page(&mut self, page_index: usize) -> EventResult {
        let page_index = page_index.min(self.page_count() - 1);
        if page_index == self.state.pagination.page_index {
            return EventResult::Ignored;
        }

        let mut next = self.state.clone();
        next.pagination.page_index = page_index;
        let events = vec![TableEvent::PaginationChanged(next.pagination)];
        self.commit(next, events)
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) -> EventResult {
        self.go_to_page(self.state.pagination.page_index.saturating_add(1))
    }

    /// Go to the previous page, if any.
    pub fn previous_page(&mut self) -> EventResult {
        match self.state.pagination.page_index.checked_sub(1) {
            Some(index) => self.go_to_page(index),
            None => EventResult::Ignored,
        }
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> EventResult {
        self.go_to_page(0)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> EventResult {
        self.go_to_page(usize::MAX)
    }

    /// Change the page size. Always returns to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<EventResult, TableError> {
        self.check_page_size(page_size)?;

        let mut next = self.state.clone();
        next.pagination = PaginationState::new(0, page_size);
        if next.pagination == self.state.pagination {
            return Ok(EventResult::Ignored);
        }

        let events = vec![TableEvent::PaginationChanged(next.pagination)];
        Ok(self.commit(next, events))
    }

    /// Flip a column's visibility.
    pub fn toggle_column(&mut self, column_id: &str) -> EventResult {
        let visible = self.state.column_visibility.is_visible(column_id);
        self.set_column_visible(column_id, !visible)
    }

    /// Show or hide a column.
    ///
    /// The column stays in the descriptor list; only rendering and the
    /// global filter skip it.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> EventResult {
        match self.column(column_id).map(|c| c.enable_hiding) {
            Some(true) => {}
            Some(false) => return EventResult::Ignored,
            None => {
                warn!("Ignoring visibility change on unknown column '{}'", column_id);
                return EventResult::Ignored;
            }
        }
        if self.state.column_visibility.is_visible(column_id) == visible {
            return EventResult::Ignored;
        }

        self.state.column_visibility.set(column_id, visible);
        if let Some((store, key)) = &self.visibility_store {
            store.set_column(key, column_id, visible);
        }

        let event = TableEvent::ColumnVisibilityChanged(self.state.column_visibility.clone());
        debug!("Table event: {} ({} -> {})", event.kind(), column_id, visible);
        self.handlers.emit(&event);
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render the current page.
    pub fn render(&self) -> TableView {
        let visible = self.visible_columns();
        let colspan = visible.len().max(1);

        let headers = visible
            .iter()
            .map(|column| HeaderCell {
                column_id: column.id.clone(),
                label: column.header.clone(),
                sort: self.state.sorting.direction_of(&column.id),
                sortable: column.enable_sorting,
                size: column.size,
            })
            .collect();

        let filtered = self.filtered_rows();
        let filtered_len = filtered.len();
        let page = self.slice_page(filtered);

        let mut rows = Vec::with_capacity(page.len() + 1);
        if let Some(label) = &self.leading_row {
            rows.push(ViewRow::Leading {
                label: label.clone(),
                colspan,
            });
        }
        if page.is_empty() {
            rows.push(ViewRow::Placeholder {
                message: self.config.empty_message.clone(),
                colspan,
            });
        } else {
            for row in &page {
                let cells = visible
                    .iter()
                    .map(|column| column.render_cell(row, &self.config.null_fallback))
                    .collect();
                rows.push(ViewRow::Data { cells });
            }
        }

        let footer = self.footer(filtered_len, page.len());
        trace!(
            "Rendered table: {} columns, {} of {} rows",
            colspan,
            page.len(),
            filtered_len
        );

        TableView {
            headers,
            rows,
            footer,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn row_passes(&self, row: &T) -> bool {
        if !matches_global(
            row,
            &self.columns,
            &self.state.column_visibility,
            &self.state.global_filter,
        ) {
            return false;
        }

        self.state
            .column_filters
            .iter()
            .all(|(column_id, filter)| match self.column(column_id) {
                Some(column) if column.enable_filtering => {
                    matches(&column.value(row), Some(filter))
                }
                _ => true,
            })
    }

    fn filtered_len(&self) -> usize {
        if self.is_server_side() {
            self.rows.len()
        } else {
            self.filtered_rows().len()
        }
    }

    fn slice_page<'a>(&self, filtered: Vec<&'a T>) -> Vec<&'a T> {
        if self.is_server_side() {
            return filtered;
        }

        let size = effective_page_size(self.state.pagination.page_size, filtered.len());
        let start = self.state.pagination.page_index.saturating_mul(size);
        filtered.into_iter().skip(start).take(size).collect()
    }

    fn footer(&self, filtered_len: usize, page_len: usize) -> Option<PaginationFooter> {
        let server = self.is_server_side();
        let total_items = self.total_items();
        if total_items == 0 {
            return None;
        }
        let displayed = displayed_total(server, total_items, filtered_len);

        let page_size = self.state.pagination.page_size;
        let size = effective_page_size(page_size, filtered_len);
        let pages = if server {
            page_count(total_items, size)
        } else {
            page_count(filtered_len, size)
        };
        let page_index = self.state.pagination.page_index;

        Some(PaginationFooter {
            page_number: page_index + 1,
            page_count: pages,
            rows_shown: rows_shown(page_len, filtered_len),
            displayed_total: displayed,
            page_size_label: page_size_label(page_size, &self.config),
            can_previous: page_index > 0,
            can_next: page_index + 1 < pages,
            options: page_size_options(server, page_size, &self.config),
        })
    }

    fn check_page_size(&self, page_size: PageSize) -> Result<(), TableError> {
        match page_size {
            PageSize::Rows(0) => Err(TableError::InvalidPageSize),
            PageSize::All if self.is_server_side() => Err(TableError::ShowAllUnavailable),
            _ => Ok(()),
        }
    }

    fn clamp_page(&mut self) {
        let last = self.page_count() - 1;
        if self.state.pagination.page_index > last {
            self.state.pagination.page_index = last;
        }
    }

    /// Apply `next` (client tables only) and emit `events` in order.
    fn commit(&mut self, next: TableState, events: Vec<TableEvent>) -> EventResult {
        if !self.is_server_side() {
            self.state = next;
        }
        for event in &events {
            debug!("Table event: {}", event.kind());
            self.handlers.emit(event);
        }
        EventResult::Consumed
    }
}

impl<T> std::fmt::Debug for TableController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("leading_row", &self.leading_row)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
