//! Filter values for a single column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// How the conditions of a multi-condition filter combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    /// Every condition must be contained.
    And,
    /// At least one condition must be contained.
    #[default]
    Or,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOperator::And => f.write_str("AND"),
            FilterOperator::Or => f.write_str("OR"),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(FilterOperator::And),
            "OR" => Ok(FilterOperator::Or),
            _ => Err(ParamError::InvalidOperator(s.to_string())),
        }
    }
}

/// The filter applied to one column.
///
/// Serializes as a bare JSON string for `Text` and as
/// `{"operator": "AND", "conditions": [...]}` for `Multi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnFilter {
    /// Single substring.
    Text(String),
    /// Several substrings joined by an operator.
    Multi {
        operator: FilterOperator,
        conditions: Vec<String>,
    },
}

impl ColumnFilter {
    /// Creates a single-substring filter.
    pub fn text(value: impl Into<String>) -> Self {
        ColumnFilter::Text(value.into())
    }

    /// Creates a multi-condition filter, normalized.
    ///
    /// Returns `None` when no condition has any content after trimming.
    pub fn multi<I, S>(operator: FilterOperator, conditions: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnFilter::Multi {
            operator,
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
        .normalize()
    }

    /// Collapse filters that cannot exclude anything to `None`.
    pub fn normalize(self) -> Option<Self> {
        match &self {
            ColumnFilter::Text(value) if value.is_empty() => None,
            ColumnFilter::Multi { conditions, .. }
                if conditions.iter().all(|c| c.trim().is_empty()) =>
            {
                None
            }
            _ => Some(self),
        }
    }

    /// Conditions ready for matching: trimmed, lower-cased, non-empty.
    pub(crate) fn prepared_conditions(conditions: &[String]) -> Vec<String> {
        conditions
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// The column filters of one table, in the order they were first set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilters {
    entries: Vec<(String, ColumnFilter)>,
}

impl ColumnFilters {
    /// Creates an empty set of column filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the filter for a column.
    pub fn get(&self, column_id: &str) -> Option<&ColumnFilter> {
        self.entries
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, filter)| filter)
    }

    /// Set or remove a column's filter. Returns `true` if anything changed.
    ///
    /// The filter is normalized first, so an all-empty filter removes the
    /// entry instead of being stored.
    pub fn set(&mut self, column_id: &str, filter: Option<ColumnFilter>) -> bool {
        let filter = filter.and_then(ColumnFilter::normalize);
        let position = self.entries.iter().position(|(id, _)| id == column_id);

        match (position, filter) {
            (Some(i), Some(filter)) => {
                if self.entries[i].1 == filter {
                    return false;
                }
                self.entries[i].1 = filter;
                true
            }
            (Some(i), None) => {
                self.entries.remove(i);
                true
            }
            (None, Some(filter)) => {
                self.entries.push((column_id.to_string(), filter));
                true
            }
            (None, None) => false,
        }
    }

    /// Builder form of [`ColumnFilters::set`].
    pub fn with(mut self, column_id: &str, filter: Option<ColumnFilter>) -> Self {
        self.set(column_id, filter);
        self
    }

    /// Normalize every entry, dropping the ones that become empty.
    pub fn normalized(self) -> Self {
        let entries = self
            .entries
            .into_iter()
            .filter_map(|(id, filter)| filter.normalize().map(|f| (id, f)))
            .collect();
        Self { entries }
    }

    /// Iterate over `(column_id, filter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnFilter)> {
        self.entries.iter().map(|(id, filter)| (id.as_str(), filter))
    }

    /// Remove all filters.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if no column is filtered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of filtered columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse() {
        assert_eq!("and".parse::<FilterOperator>(), Ok(FilterOperator::And));
        assert_eq!(" OR ".parse::<FilterOperator>(), Ok(FilterOperator::Or));
        assert_eq!(
            "xor".parse::<FilterOperator>(),
            Err(ParamError::InvalidOperator("xor".to_string()))
        );
    }

    #[test]
    fn test_all_empty_conditions_normalize_to_none() {
        for count in 0..5 {
            let conditions = vec!["  ".to_string(); count];
            assert_eq!(ColumnFilter::multi(FilterOperator::And, conditions), None);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let filter = ColumnFilter::multi(FilterOperator::Or, ["fastq", ""]).unwrap();
        assert_eq!(filter.clone().normalize(), Some(filter));
    }

    #[test]
    fn test_empty_text_normalizes_to_none() {
        assert_eq!(ColumnFilter::text("").normalize(), None);
        assert!(ColumnFilter::text(" ").normalize().is_some());
    }

    #[test]
    fn test_serde_shapes() {
        let text: ColumnFilter = serde_json::from_str(r#""fail""#).unwrap();
        assert_eq!(text, ColumnFilter::text("fail"));

        let multi: ColumnFilter =
            serde_json::from_str(r#"{"operator":"AND","conditions":["a","b"]}"#).unwrap();
        assert_eq!(
            multi,
            ColumnFilter::Multi {
                operator: FilterOperator::And,
                conditions: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_column_filters_set_and_remove() {
        let mut filters = ColumnFilters::new();
        assert!(filters.set("status", Some(ColumnFilter::text("fail"))));
        assert!(!filters.set("status", Some(ColumnFilter::text("fail"))));
        assert_eq!(filters.get("status"), Some(&ColumnFilter::text("fail")));

        // An all-empty multi filter removes the entry
        let empty = ColumnFilter::Multi {
            operator: FilterOperator::Or,
            conditions: vec![String::new()],
        };
        assert!(filters.set("status", Some(empty)));
        assert!(filters.is_empty());
        assert!(!filters.set("status", None));
    }
}
