//! Column visibility maps and their in-memory store.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Show/hide state per column id. Columns without an entry are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap {
    columns: HashMap<String, bool>,
}

impl VisibilityMap {
    /// Creates an empty map (every column visible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` unless the column was explicitly hidden.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.columns.get(column_id).copied().unwrap_or(true)
    }

    /// Set a column's visibility.
    pub fn set(&mut self, column_id: impl Into<String>, visible: bool) {
        self.columns.insert(column_id.into(), visible);
    }

    /// Flip a column's visibility. Returns the new value.
    pub fn toggle(&mut self, column_id: &str) -> bool {
        let visible = !self.is_visible(column_id);
        self.set(column_id, visible);
        visible
    }

    /// Ids of explicitly hidden columns, sorted.
    pub fn hidden(&self) -> Vec<&str> {
        let mut hidden: Vec<&str> = self
            .columns
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id.as_str())
            .collect();
        hidden.sort_unstable();
        hidden
    }

    /// Returns `true` if no column has an explicit entry.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for VisibilityMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }
}

/// Column visibility per grouping key (for example a project id).
///
/// Cloning yields another handle to the same map, so the composition root
/// creates one store and hands clones to every table that needs it. Data is
/// held in memory only and is lost when the process exits. Writes are
/// last-writer-wins.
///
/// # Example
///
/// ```
/// use ngs360_lib::ColumnVisibilityStore;
///
/// let store = ColumnVisibilityStore::new();
/// store.set_column("P-0042", "md5", false);
///
/// assert!(!store.get("P-0042").is_visible("md5"));
/// assert!(store.get("P-0043").is_visible("md5"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnVisibilityStore {
    store: Arc<DashMap<String, VisibilityMap>>,
}

impl ColumnVisibilityStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Returns the visibility map for a key, empty when never set.
    pub fn get(&self, key: &str) -> VisibilityMap {
        self.store
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Replace the visibility map for a key.
    pub fn set(&self, key: &str, map: VisibilityMap) {
        self.store.insert(key.to_string(), map);
    }

    /// Set one column's visibility under a key.
    pub fn set_column(&self, key: &str, column_id: &str, visible: bool) {
        self.store
            .entry(key.to_string())
            .or_default()
            .set(column_id, visible);
    }

    /// Forget the visibility map for a key.
    pub fn clear(&self, key: &str) {
        self.store.remove(key);
    }

    /// Forget every visibility map.
    pub fn clear_all(&self) {
        self.store.clear();
    }

    /// Returns the number of keys with a stored map.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
