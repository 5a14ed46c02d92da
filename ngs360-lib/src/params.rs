//! Table state in URL query strings.
//!
//! Pages keep their table state in the query string so links and reloads
//! land on the same view. URLs count pages from 1, the controller from 0;
//! this module is where the two meet.

use url::form_urlencoded;

use crate::error::ParamError;
use crate::pagination::PageSize;
use crate::sorting::SortingState;
use crate::table::TableState;

const PAGE: &str = "page";
const PER_PAGE: &str = "per_page";
const SORT: &str = "sort";
const DESC: &str = "desc";
const QUERY: &str = "query";

/// Table state as carried in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableParams {
    /// One-based page number.
    pub page: usize,
    /// Rows per page, when given.
    pub per_page: Option<PageSize>,
    /// Sorted column.
    pub sort: Option<String>,
    /// Descending sort.
    pub desc: bool,
    /// Global filter text.
    pub query: Option<String>,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
            sort: None,
            desc: false,
            query: None,
        }
    }
}

impl TableParams {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown keys are ignored. A missing page means page 1.
    pub fn parse(query: &str) -> Result<Self, ParamError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = TableParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                PAGE => {
                    let page: usize = value
                        .trim()
                        .parse()
                        .map_err(|_| ParamError::invalid_number(PAGE, value.to_string()))?;
                    if page == 0 {
                        return Err(ParamError::PageOutOfRange);
                    }
                    params.page = page;
                }
                PER_PAGE => params.per_page = Some(value.parse()?),
                SORT if !value.is_empty() => params.sort = Some(value.into_owned()),
                DESC => params.desc = matches!(&*value, "1" | "true"),
                QUERY if !value.is_empty() => params.query = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(params)
    }

    /// Encode as a query string without the leading `?`. Defaults are
    /// omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.page > 1 {
            serializer.append_pair(PAGE, &self.page.to_string());
        }
        if let Some(per_page) = self.per_page {
            serializer.append_pair(PER_PAGE, &per_page.to_string());
        }
        if let Some(sort) = &self.sort {
            serializer.append_pair(SORT, sort);
            if self.desc {
                serializer.append_pair(DESC, "true");
            }
        }
        if let Some(query) = &self.query {
            serializer.append_pair(QUERY, query);
        }
        serializer.finish()
    }

    /// Capture the URL-relevant parts of a table state.
    pub fn from_state(state: &TableState) -> Self {
        let primary = state.sorting.primary();
        Self {
            page: state.pagination.page_number(),
            per_page: Some(state.pagination.page_size),
            sort: primary.map(|sort| sort.column_id.clone()),
            desc: primary.is_some_and(|sort| sort.desc),
            query: Some(state.global_filter.clone()).filter(|q| !q.is_empty()),
        }
    }

    /// Write these parameters into a table state.
    ///
    /// Filters and visibility are left untouched.
    pub fn apply_to(&self, state: &mut TableState) {
        state.pagination.page_index = self.page.saturating_sub(1);
        if let Some(per_page) = self.per_page {
            state.pagination.page_size = per_page;
        }
        state.sorting = match &self.sort {
            Some(column_id) => SortingState::single(column_id.clone(), self.desc),
            None => SortingState::none(),
        };
        state.global_filter = self.query.clone().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationState;

    #[test]
    fn test_parse_defaults() {
        assert_eq!(TableParams::parse("").unwrap(), TableParams::default());
        assert_eq!(TableParams::parse("?").unwrap(), TableParams::default());
    }

    #[test]
    fn test_parse_all_keys() {
        let params =
            TableParams::parse("?page=3&per_page=25&sort=created_on&desc=true&query=WGS+run&x=1")
                .unwrap();
        assert_eq!(
            params,
            TableParams {
                page: 3,
                per_page: Some(PageSize::Rows(25)),
                sort: Some("created_on".to_string()),
                desc: true,
                query: Some("WGS run".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(TableParams::parse("page=0"), Err(ParamError::PageOutOfRange));
        assert_eq!(
            TableParams::parse("page=two"),
            Err(ParamError::invalid_number("page", "two"))
        );
        assert!(TableParams::parse("per_page=0").is_err());
        assert_eq!(
            TableParams::parse("per_page=all").unwrap().per_page,
            Some(PageSize::All)
        );
    }

    #[test]
    fn test_one_based_boundary() {
        let mut state = TableState::default();
        TableParams::parse("page=4&per_page=20").unwrap().apply_to(&mut state);
        assert_eq!(state.pagination, PaginationState::new(3, PageSize::Rows(20)));

        let params = TableParams::from_state(&state);
        assert_eq!(params.page, 4);
        assert_eq!(params.to_query_string(), "page=4&per_page=20");
    }

    #[test]
    fn test_sort_and_query_round_trip_through_state() {
        let mut state = TableState::default();
        TableParams::parse("sort=name&desc=1&query=a%26b").unwrap().apply_to(&mut state);
        assert_eq!(state.sorting, SortingState::single("name", true));
        assert_eq!(state.global_filter, "a&b");

        let query = TableParams::from_state(&state).to_query_string();
        assert_eq!(query, "per_page=10&sort=name&desc=true&query=a%26b");
    }
}
