//! Repository-facing filter
//!
//! [`PaginationFilter`] is the repository-side counterpart of a parsed
//! [`PaginationQuery`](crate::query::PaginationQuery): everything is
//! optional, so callers can paginate with defaults or run unpaged
//! `find_all` queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{PaginationQuery, SearchClause, SortDirection};

/// Filter input for [`FilteredRepository`](super::FilteredRepository)
/// operations
///
/// # Example
///
/// ```rust
/// use queryspec::repository::PaginationFilter;
///
/// let filter = PaginationFilter::new()
///     .with_page(2)
///     .with_limit(10)
///     .with_fields(vec!["name".to_string()]);
///
/// assert_eq!(filter.page, Some(2));
/// assert_eq!(filter.limit, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationFilter {
    /// 1-indexed page; `None` lets `paginate` fall back to 1
    pub page: Option<u32>,
    /// Page size; `None` lets `paginate` fall back to 10
    pub limit: Option<u32>,
    /// Requested projection; empty means all fields
    #[serde(default)]
    pub fields: Vec<String>,
    /// Sort order, passed through to the store unchanged
    #[serde(default)]
    pub order: Vec<(String, SortDirection)>,
    /// Search clauses per field
    #[serde(default)]
    pub search: BTreeMap<String, Vec<SearchClause>>,
}

impl PaginationFilter {
    /// Create an empty filter (matches everything, no pagination)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the requested projection
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Append a sort entry
    #[must_use]
    pub fn with_order(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push((field.into(), direction));
        self
    }

    /// Append a search clause for a field
    #[must_use]
    pub fn with_search(mut self, field: impl Into<String>, clause: SearchClause) -> Self {
        self.search.entry(field.into()).or_default().push(clause);
        self
    }
}

impl From<PaginationQuery> for PaginationFilter {
    fn from(query: PaginationQuery) -> Self {
        Self {
            page: Some(query.page),
            limit: Some(query.limit),
            fields: query.fields,
            order: query.order,
            search: query.search,
        }
    }
}
