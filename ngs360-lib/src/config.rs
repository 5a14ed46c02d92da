//! Table configuration

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

/// Presentation and pagination defaults for a table.
///
/// Every field has a default, so a JSON file only needs the keys it wants to
/// change.
///
/// # Example
///
/// ```
/// use ngs360_lib::TableConfig;
///
/// let config = TableConfig::default()
///     .with_default_page_size(25)
///     .with_empty_message("No runs found.");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Sizes offered by the "rows per page" selector.
    ///
    /// Default: 5, 10, 20, 25, 30, 40, 50
    pub page_size_options: Vec<usize>,

    /// Page size for a fresh table.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Label of the "show all" page size option.
    ///
    /// Default: "All"
    pub all_label: String,

    /// Text of the placeholder row shown when there are no rows.
    ///
    /// Default: "No results."
    pub empty_message: String,

    /// Text rendered for cells whose value is missing.
    ///
    /// Default: empty
    pub null_fallback: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            all_label: "All".to_string(),
            empty_message: "No results.".to_string(),
            null_fallback: String::new(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size menu.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets the initial page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the "show all" label.
    pub fn with_all_label(mut self, label: impl Into<String>) -> Self {
        self.all_label = label.into();
        self
    }

    /// Sets the empty placeholder text.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the text rendered for missing values.
    pub fn with_null_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.null_fallback = fallback.into();
        self
    }

    /// Check that the page size settings are usable.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.page_size_options.is_empty() {
            return Err(TableError::InvalidConfig(
                "page_size_options must not be empty".to_string(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(TableError::InvalidConfig(
                "page_size_options must not contain 0".to_string(),
            ));
        }
        if self.default_page_size == 0 {
            return Err(TableError::InvalidConfig(
                "default_page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.page_size_options, vec![5, 10, 20, 25, 30, 40, 50]);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.all_label, "All");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = TableConfig::from_json(r#"{"default_page_size": 25}"#).unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.empty_message, "No results.");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            TableConfig::from_json(r#"{"page_size_options": []}"#),
            Err(TableError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::from_json(r#"{"default_page_size": 0}"#),
            Err(TableError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::from_json("{not json"),
            Err(TableError::Config(_))
        ));
    }
}
