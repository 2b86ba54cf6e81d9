//! Search filter operators
//!
//! The nine operators a search parameter may carry as its nested key,
//! e.g. `status[eq]=active` or `age[btw]=18,65`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// Comparison operator carried by a search clause
///
/// Operators parse from their lowercase wire form only; anything else is
/// rejected during query parsing.
///
/// # Example
///
/// ```rust
/// use queryspec::query::FilterOperator;
///
/// let op: FilterOperator = "gte".parse().unwrap();
/// assert_eq!(op, FilterOperator::Gte);
/// assert!(op.is_numeric());
/// assert_eq!(op.as_str(), "gte");
///
/// assert!("GTE".parse::<FilterOperator>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Field equals the value exactly
    Eq,
    /// Field contains the value as a substring
    Like,
    /// Field is not equal to the value
    Ne,
    /// Field is strictly greater than the value
    Gt,
    /// Field is greater than or equal to the value
    Gte,
    /// Field equals one of the comma-separated values
    In,
    /// Field is strictly less than the value
    Lt,
    /// Field is less than or equal to the value
    Lte,
    /// Field is between two comma-separated values, inclusive
    Btw,
}

impl FilterOperator {
    /// All operators, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Eq,
        Self::Like,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::In,
        Self::Lt,
        Self::Lte,
        Self::Btw,
    ];

    /// Wire form of the operator
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Like => "like",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Btw => "btw",
        }
    }

    /// Whether every value of this operator must be an unsigned integer
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::query::FilterOperator;
    ///
    /// assert!(FilterOperator::Btw.is_numeric());
    /// assert!(!FilterOperator::In.is_numeric());
    /// ```
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte | Self::Btw)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "like" => Ok(Self::Like),
            "ne" => Ok(Self::Ne),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "in" => Ok(Self::In),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "btw" => Ok(Self::Btw),
            other => Err(ParseError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}
