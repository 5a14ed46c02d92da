//! Change notifications emitted by the table controller.

use crate::filter::ColumnFilters;
use crate::pagination::PaginationState;
use crate::sorting::SortingState;
use crate::visibility::VisibilityMap;

/// A state change proposed or applied by the controller.
///
/// Server-paginated owners forward these to their next request and echo
/// the applied state back with `set_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// New page or page size.
    PaginationChanged(PaginationState),
    /// New sort.
    SortingChanged(SortingState),
    /// New global filter text.
    FilterChanged(String),
    /// New column filters.
    ColumnFiltersChanged(ColumnFilters),
    /// New column visibility.
    ColumnVisibilityChanged(VisibilityMap),
}

impl TableEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TableEvent::PaginationChanged(_) => "pagination",
            TableEvent::SortingChanged(_) => "sorting",
            TableEvent::FilterChanged(_) => "filter",
            TableEvent::ColumnFiltersChanged(_) => "column_filters",
            TableEvent::ColumnVisibilityChanged(_) => "column_visibility",
        }
    }
}

/// Result of handling an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing changed, no event was emitted.
    Ignored,
    /// The interaction produced at least one event.
    Consumed,
}

impl EventResult {
    /// Check if the interaction was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

type Handler = Box<dyn FnMut(&TableEvent)>;

/// Subscribed event handlers, called in registration order.
#[derive(Default)]
pub(crate) struct EventHandlers {
    handlers: Vec<Handler>,
}

impl EventHandlers {
    pub(crate) fn push(&mut self, handler: impl FnMut(&TableEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Deliver an event to every handler, synchronously.
    pub(crate) fn emit(&mut self, event: &TableEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("count", &self.handlers.len())
            .finish()
    }
}
