//! Page index and page size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Sizes offered by the "rows per page" selector.
pub const PAGE_SIZE_OPTIONS: [usize; 7] = [5, 10, 20, 25, 30, 40, 50];

/// Page size of a fresh table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows per page.
///
/// `All` is only meaningful for client-paginated tables, where it resolves
/// to the current filtered row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr", into = "PageSizeRepr")]
pub enum PageSize {
    /// A fixed number of rows, always greater than zero.
    Rows(usize),
    /// Every row on one page.
    All,
}

impl PageSize {
    /// Returns the row count for `Rows`, `None` for `All`.
    pub fn rows(&self) -> Option<usize> {
        match self {
            PageSize::Rows(n) => Some(*n),
            PageSize::All => None,
        }
    }

    /// Returns `true` for `All`.
    pub fn is_all(&self) -> bool {
        matches!(self, PageSize::All)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Rows(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(n) => write!(f, "{}", n),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => Ok(PageSize::Rows(n)),
            _ => Err(ParamError::invalid_number("per_page", s)),
        }
    }
}

/// Wire form of [`PageSize`]: a positive number or the string `"all"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeRepr {
    Rows(usize),
    Label(String),
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = ParamError;

    fn try_from(repr: PageSizeRepr) -> Result<Self, Self::Error> {
        match repr {
            PageSizeRepr::Rows(0) => Err(ParamError::invalid_number("per_page", "0")),
            PageSizeRepr::Rows(n) => Ok(PageSize::Rows(n)),
            PageSizeRepr::Label(label) => label.parse(),
        }
    }
}

impl From<PageSize> for PageSizeRepr {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Rows(n) => PageSizeRepr::Rows(n),
            PageSize::All => PageSizeRepr::Label("all".to_string()),
        }
    }
}

/// Current page and page size. `page_index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: PageSize,
}

impl PaginationState {
    /// Creates a pagination state.
    pub fn new(page_index: usize, page_size: PageSize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Creates a pagination state from a one-based page number.
    ///
    /// Page number 0 is treated as 1.
    pub fn from_page_number(page_number: usize, page_size: PageSize) -> Self {
        Self::new(page_number.saturating_sub(1), page_size)
    }

    /// One-based page number, as shown to users and written to URLs.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    /// The same page size on the first page.
    pub fn first_page(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }
}
