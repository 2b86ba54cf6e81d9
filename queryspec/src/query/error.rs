//! Query parse errors
//!
//! Every malformed request parameter surfaces as a [`ParseError`] carrying a
//! human-readable message. Parse errors are client faults: they are never
//! retried or recovered internally, and are meant to propagate directly to
//! the caller.

use thiserror::Error;

use super::operator::FilterOperator;

/// Validation failure raised while parsing request parameters
///
/// # Example
///
/// ```rust
/// use queryspec::query::{ParseError, QueryParams, QueryParser};
///
/// let params = QueryParams::new().with("limit", "51");
/// let err = QueryParser::default().parse(&params).unwrap_err();
/// assert_eq!(err, ParseError::LimitTooLarge { max: 50 });
/// assert!(err.to_string().contains("less than 50"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `page` was present but not a digit string
    #[error("page must be a number")]
    PageNotNumeric,

    /// `page` parsed to zero or overflowed
    #[error("page must be a number greater than 0")]
    PageOutOfRange,

    /// `limit` was present but not a digit string
    #[error("limit must be a number")]
    LimitNotNumeric,

    /// `limit` parsed below the allowed minimum
    #[error("limit must be a number greater than 0")]
    LimitTooSmall,

    /// `limit` parsed above the allowed maximum
    #[error("limit must be a number less than {max}")]
    LimitTooLarge {
        /// The configured upper bound
        max: u32,
    },

    /// An `order` token carried a direction other than `ASC` or `DESC`
    #[error("order direction must be ASC or DESC, got `{0}`")]
    InvalidSortDirection(String),

    /// A search parameter used an operator outside the recognized set
    #[error(
        "unknown search operator `{operator}`; use one of: eq, like, ne, gt, gte, in, lt, lte, btw"
    )]
    UnknownOperator {
        /// The operator as supplied
        operator: String,
    },

    /// A numeric-only operator received a non-numeric value
    #[error("the operator {operator} only accepts numbers")]
    NonNumericValue {
        /// The offending operator
        operator: FilterOperator,
    },

    /// `btw` did not receive exactly two comma-separated values
    #[error("the operator btw requires exactly two comma-separated values")]
    BetweenArity,

    /// A parameter had the wrong shape (nested where flat was expected, or
    /// the reverse)
    #[error("parameter `{name}` is malformed")]
    MalformedParameter {
        /// The parameter name as supplied
        name: String,
    },
}
