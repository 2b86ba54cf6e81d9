//! Store query building
//!
//! [`StoreQuery`] is the translated, store-facing form of a
//! [`PaginationFilter`]: projected columns, AND-combined predicates, sort
//! order, and offset/limit. Adapters execute it however their backend
//! requires; this module only assembles it.

use std::collections::BTreeSet;

use crate::query::SortDirection;

use super::filter::PaginationFilter;
use super::predicate::{translate, FieldPredicate};

/// Translated query handed to a record-store adapter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreQuery {
    /// Columns to project; empty means all
    pub select: Vec<String>,
    /// AND-combined predicates
    pub conditions: Vec<FieldPredicate>,
    /// Sort order
    pub order: Vec<(String, SortDirection)>,
    /// Maximum rows to return
    pub limit: Option<u64>,
    /// Rows to skip before returning
    pub offset: Option<u64>,
}

impl StoreQuery {
    /// An unrestricted query (all rows, all columns)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store query from a filter against a known column set
    ///
    /// - non-empty `fields` are intersected with `columns`, silently
    ///   dropping unknown names;
    /// - `limit` caps the fetch; with `page` also set, the offset is
    ///   `(page - 1) * limit`;
    /// - `search` is translated into [`FieldPredicate`]s, replacing any
    ///   previously held conditions;
    /// - `order` passes through unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use queryspec::repository::{PaginationFilter, StoreQuery};
    ///
    /// let columns: BTreeSet<String> =
    ///     ["name".to_string(), "email".to_string()].into();
    /// let filter = PaginationFilter::new()
    ///     .with_page(3)
    ///     .with_limit(20)
    ///     .with_fields(vec!["name".to_string(), "phone".to_string()]);
    ///
    /// let query = StoreQuery::from_filter(&filter, &columns);
    /// assert_eq!(query.select, vec!["name"]);
    /// assert_eq!(query.limit, Some(20));
    /// assert_eq!(query.offset, Some(40));
    /// ```
    #[must_use]
    pub fn from_filter(filter: &PaginationFilter, columns: &BTreeSet<String>) -> Self {
        let mut query = Self::new();

        if !filter.fields.is_empty() {
            query.select = filter
                .fields
                .iter()
                .filter(|field| columns.contains(*field))
                .cloned()
                .collect();
        }

        if let Some(limit) = filter.limit {
            query.limit = Some(u64::from(limit));
        }
        if let Some(page) = filter.page {
            if let Some(limit) = filter.limit {
                query.offset = Some(u64::from(page.saturating_sub(1)) * u64::from(limit));
            }
        }

        if !filter.search.is_empty() {
            query.conditions = translate(&filter.search, columns);
        }

        query.order = filter.order.clone();
        query
    }
}
