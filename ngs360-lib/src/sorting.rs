//! Sort state and the header click cycle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ColumnDef, TableRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortDirection {
    /// Returns `true` for `Descending`.
    pub fn is_desc(&self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

/// Sort on one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    /// Column being sorted.
    #[serde(rename = "id")]
    pub column_id: String,
    /// Descending when `true`.
    pub desc: bool,
}

impl ColumnSort {
    /// Creates an ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            desc: false,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            desc: true,
        }
    }

    /// Direction of this sort.
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Ordered sort entries.
///
/// Only the first entry is used. Later entries are kept as given and
/// ignored, so a caller passing a multi-column sort still gets a
/// well-defined single-column result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortingState(pub Vec<ColumnSort>);

impl SortingState {
    /// No sort.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Sort on a single column.
    pub fn single(column_id: impl Into<String>, desc: bool) -> Self {
        Self(vec![ColumnSort {
            column_id: column_id.into(),
            desc,
        }])
    }

    /// The entry that actually determines the order.
    pub fn primary(&self) -> Option<&ColumnSort> {
        self.0.first()
    }

    /// Direction of a column if it is the primary sort.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.primary()
            .filter(|sort| sort.column_id == column_id)
            .map(ColumnSort::direction)
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-column header click counters.
///
/// Each click advances that column through ascending, descending, cleared
/// and back to ascending. Counters live as long as the owning table and
/// are not reset when rows or columns are replaced.
#[derive(Debug, Clone, Default)]
pub struct SortCycle {
    clicks: HashMap<String, u32>,
}

impl SortCycle {
    /// Creates a cycle with no clicks recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click on a column header and return the resulting direction.
    ///
    /// `None` means the sort is cleared.
    pub fn click(&mut self, column_id: &str) -> Option<SortDirection> {
        let count = self.clicks.entry(column_id.to_string()).or_insert(0);
        *count = count.wrapping_add(1);

        match *count % 3 {
            1 => Some(SortDirection::Ascending),
            2 => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// Number of clicks recorded for a column.
    pub fn clicks(&self, column_id: &str) -> u32 {
        self.clicks.get(column_id).copied().unwrap_or(0)
    }
}

/// Stable sort of row references by one column's values.
pub fn sort_rows<T: TableRow>(rows: &mut [&T], column: &ColumnDef<T>, desc: bool) {
    rows.sort_by(|a, b| {
        let ordering = column.value(a).sort_cmp(&column.value(b));
        if desc { ordering.reverse() } else { ordering }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    struct Sample {
        name: &'static str,
        reads: i64,
    }

    impl TableRow for Sample {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => self.name.into(),
                "reads" => self.reads.into(),
                _ => CellValue::Null,
            }
        }
    }

    #[test]
    fn test_three_step_cycle() {
        let mut cycle = SortCycle::new();
        assert_eq!(cycle.click("name"), Some(SortDirection::Ascending));
        assert_eq!(cycle.click("name"), Some(SortDirection::Descending));
        assert_eq!(cycle.click("name"), None);
        assert_eq!(cycle.click("name"), Some(SortDirection::Ascending));
        assert_eq!(cycle.clicks("name"), 4);
    }

    #[test]
    fn test_cycles_are_per_column() {
        let mut cycle = SortCycle::new();
        cycle.click("name");
        assert_eq!(cycle.click("reads"), Some(SortDirection::Ascending));
        assert_eq!(cycle.click("name"), Some(SortDirection::Descending));
    }

    #[test]
    fn test_primary_ignores_later_entries() {
        let sorting = SortingState(vec![ColumnSort::desc("reads"), ColumnSort::asc("name")]);
        assert_eq!(sorting.primary(), Some(&ColumnSort::desc("reads")));
        assert_eq!(sorting.direction_of("reads"), Some(SortDirection::Descending));
        assert_eq!(sorting.direction_of("name"), None);
    }

    #[test]
    fn test_sort_rows_numeric_and_stable() {
        let samples = [
            Sample { name: "b", reads: 10 },
            Sample { name: "a", reads: 9 },
            Sample { name: "c", reads: 10 },
        ];
        let mut rows: Vec<&Sample> = samples.iter().collect();
        let column = ColumnDef::key("reads", "Reads");

        sort_rows(&mut rows, &column, false);
        assert_eq!(rows.iter().map(|s| s.name).collect::<Vec<_>>(), ["a", "b", "c"]);

        sort_rows(&mut rows, &column, true);
        assert_eq!(rows.iter().map(|s| s.name).collect::<Vec<_>>(), ["b", "c", "a"]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&SortingState::single("name", true)).unwrap();
        assert_eq!(json, r#"[{"id":"name","desc":true}]"#);
    }
}
