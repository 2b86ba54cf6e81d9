//! Parsed query specification values
//!
//! [`PaginationQuery`] is the validated, typed output of
//! [`QueryParser::parse`](super::QueryParser::parse). It is a plain immutable
//! value: constructed once per request, consumed by the repository layer,
//! then discarded.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::operator::FilterOperator;

/// Sort direction for an `order` entry
///
/// Only the exact uppercase tokens `ASC` and `DESC` parse; the wire format
/// is case-sensitive.
///
/// # Example
///
/// ```rust
/// use queryspec::query::SortDirection;
///
/// let dir: SortDirection = "DESC".parse().unwrap();
/// assert_eq!(dir, SortDirection::Desc);
/// assert_eq!(dir.as_str(), "DESC");
///
/// assert!("desc".parse::<SortDirection>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending (A-Z, 0-9)
    #[default]
    Asc,
    /// Descending (Z-A, 9-0)
    Desc,
}

impl SortDirection {
    /// Wire form of the direction
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(ParseError::InvalidSortDirection(other.to_string())),
        }
    }
}

/// One search clause: an operator and its raw value tokens
///
/// Invariants maintained by the parser: [`FilterOperator::Btw`] carries
/// exactly two values, [`FilterOperator::In`] one or more, every other
/// operator exactly one; values of numeric operators are digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchClause {
    /// The comparison operator
    pub operator: FilterOperator,
    /// Raw string tokens, in encounter order
    pub values: Vec<String>,
}

impl SearchClause {
    /// Create a clause from an operator and its values
    #[must_use]
    pub fn new(operator: FilterOperator, values: Vec<String>) -> Self {
        Self { operator, values }
    }

    /// Convenience constructor for single-value clauses
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::query::{FilterOperator, SearchClause};
    ///
    /// let clause = SearchClause::single(FilterOperator::Eq, "active");
    /// assert_eq!(clause.values, vec!["active".to_string()]);
    /// ```
    #[must_use]
    pub fn single(operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            operator,
            values: vec![value.into()],
        }
    }
}

/// Validated query specification for one request
///
/// Produced exclusively by [`QueryParser::parse`](super::QueryParser::parse);
/// `page` and `limit` are always within their validated ranges, `fields`
/// empty means "no restriction", and `search` maps each field to its clauses
/// in encounter order.
///
/// # Example
///
/// ```rust
/// use queryspec::query::{QueryParams, QueryParser, SortDirection};
///
/// let params = QueryParams::new()
///     .with("page", "2")
///     .with("order", "name:ASC,age:DESC")
///     .with_op("status", "eq", "active");
///
/// let query = QueryParser::default().parse(&params).unwrap();
/// assert_eq!(query.page, 2);
/// assert_eq!(query.limit, 10);
/// assert_eq!(query.order[0], ("name".to_string(), SortDirection::Asc));
/// assert_eq!(query.search["status"].len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationQuery {
    /// 1-indexed page number, always >= 1
    pub page: u32,
    /// Page size, always within the configured bounds
    pub limit: u32,
    /// Requested projection; empty means all fields
    pub fields: Vec<String>,
    /// Sort order entries; later duplicates of a field overwrite earlier
    /// ones in place
    pub order: Vec<(String, SortDirection)>,
    /// Search clauses per field, in encounter order
    pub search: BTreeMap<String, Vec<SearchClause>>,
}
