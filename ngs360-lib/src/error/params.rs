//! ParamError for the search-parameter boundary

/// Error type for parsing table state out of a URL query string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The parameter should hold a positive integer.
    #[error("Parameter '{key}' has invalid value '{value}'")]
    InvalidNumber { key: String, value: String },

    /// Page numbers in URLs are one-based.
    #[error("Page numbers start at 1")]
    PageOutOfRange,

    /// Filter operators are `AND` or `OR`.
    #[error("Unknown filter operator '{0}', expected AND or OR")]
    InvalidOperator(String),
}

impl ParamError {
    /// Creates a new invalid number error.
    pub fn invalid_number(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            key: key.into(),
            value: value.into(),
        }
    }
}
