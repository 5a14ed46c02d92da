//! Predicate evaluation for column and global filters.

use crate::model::{CellValue, ColumnDef, TableRow};
use crate::visibility::VisibilityMap;

use super::condition::{ColumnFilter, FilterOperator};

/// Decide whether a cell value satisfies a column filter.
///
/// - `None` matches everything.
/// - `Text` matches when the lower-cased cell contains the lower-cased text.
/// - `Multi` trims and lower-cases its conditions and drops empty ones.
///   With nothing left it matches everything, otherwise `And` needs every
///   condition contained and `Or` needs at least one.
///
/// # Example
///
/// ```
/// use ngs360_lib::{matches, CellValue, ColumnFilter, FilterOperator};
///
/// let status = CellValue::from("Succeeded");
/// assert!(matches(&status, None));
/// assert!(matches(&status, Some(&ColumnFilter::text("SUCC"))));
///
/// let any = ColumnFilter::multi(FilterOperator::Or, ["failed", "succeeded"]).unwrap();
/// assert!(matches(&status, Some(&any)));
/// ```
pub fn matches(cell: &CellValue, filter: Option<&ColumnFilter>) -> bool {
    let Some(filter) = filter else {
        return true;
    };

    let haystack = cell.to_lowercase_string();

    match filter {
        ColumnFilter::Text(needle) => haystack.contains(&needle.to_lowercase()),
        ColumnFilter::Multi {
            operator,
            conditions,
        } => {
            let conditions = ColumnFilter::prepared_conditions(conditions);
            if conditions.is_empty() {
                return true;
            }
            match operator {
                FilterOperator::And => conditions.iter().all(|c| haystack.contains(c.as_str())),
                FilterOperator::Or => conditions.iter().any(|c| haystack.contains(c.as_str())),
            }
        }
    }
}

/// Decide whether a row satisfies the global filter.
///
/// The query is trimmed and lower-cased; empty matches everything. Otherwise
/// at least one visible column's value must contain it. Hidden columns are
/// not searched.
pub fn matches_global<T: TableRow>(
    row: &T,
    columns: &[ColumnDef<T>],
    visibility: &VisibilityMap,
    query: &str,
) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    columns
        .iter()
        .filter(|column| visibility.is_visible(&column.id))
        .any(|column| column.value(row).to_lowercase_string().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(operator: FilterOperator, conditions: &[&str]) -> ColumnFilter {
        ColumnFilter::Multi {
            operator,
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_none_matches_everything() {
        assert!(matches(&CellValue::Null, None));
        assert!(matches(&CellValue::from("x"), None));
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let cell = CellValue::from("Succeeded");
        assert!(matches(&cell, Some(&ColumnFilter::text("CEED"))));
        assert!(!matches(&cell, Some(&ColumnFilter::text("failed"))));
    }

    #[test]
    fn test_null_cell_is_empty_string() {
        assert!(matches(&CellValue::Null, Some(&ColumnFilter::text(""))));
        assert!(!matches(&CellValue::Null, Some(&ColumnFilter::text("a"))));
    }

    #[test]
    fn test_numbers_are_stringified() {
        assert!(matches(&CellValue::from(2024), Some(&ColumnFilter::text("02"))));
    }

    #[test]
    fn test_and_requires_all() {
        let cell = CellValue::from("sample_R1.fastq.gz");
        assert!(matches(&cell, Some(&multi(FilterOperator::And, &["r1", "FASTQ"]))));
        assert!(!matches(&cell, Some(&multi(FilterOperator::And, &["r1", "bam"]))));
    }

    #[test]
    fn test_or_requires_any() {
        let cell = CellValue::from("sample_R1.fastq.gz");
        assert!(matches(&cell, Some(&multi(FilterOperator::Or, &["bam", "fastq"]))));
        assert!(!matches(&cell, Some(&multi(FilterOperator::Or, &["bam", "cram"]))));
    }

    #[test]
    fn test_blank_conditions_are_dropped() {
        let cell = CellValue::from("Failed");
        assert!(matches(&cell, Some(&multi(FilterOperator::And, &["  fail  ", "", " "]))));
        assert!(matches(&cell, Some(&multi(FilterOperator::And, &["", "  "]))));
        assert!(matches(&cell, Some(&multi(FilterOperator::Or, &[]))));
    }
}
