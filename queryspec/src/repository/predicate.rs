//! Operator-to-predicate translation
//!
//! Turns validated search clauses into store-level predicates. Unknown
//! fields are dropped silently (no error), and every surviving predicate
//! combines with logical AND; there is no OR support.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::query::{FilterOperator, SearchClause};

/// A single store-level comparison
///
/// The closed counterpart of [`FilterOperator`]: every operator maps to
/// exactly one predicate shape, checked exhaustively at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals the value exactly
    Eq(String),
    /// Field contains the value as a substring (wildcard both sides)
    Like(String),
    /// Field is not equal to the value
    Ne(String),
    /// Field is strictly greater than the value
    Gt(String),
    /// Field is greater than or equal to the value
    Gte(String),
    /// Field equals one of the values
    In(Vec<String>),
    /// Field is strictly less than the value
    Lt(String),
    /// Field is less than or equal to the value
    Lte(String),
    /// Field is between the two values, inclusive on both ends
    Between(String, String),
}

impl Predicate {
    /// Build a predicate from a validated clause
    ///
    /// Returns `None` for clause shapes that match no branch (an empty
    /// value list, or a `btw` clause without exactly two values). The
    /// parser never produces such clauses; this is the translation stage's
    /// own guard, and a guarded clause yields no predicate rather than an
    /// error.
    #[must_use]
    pub fn from_clause(clause: &SearchClause) -> Option<Self> {
        let values = &clause.values;
        match clause.operator {
            FilterOperator::Eq => values.first().map(|v| Self::Eq(v.clone())),
            FilterOperator::Like => values.first().map(|v| Self::Like(v.clone())),
            FilterOperator::Ne => values.first().map(|v| Self::Ne(v.clone())),
            FilterOperator::Gt => values.first().map(|v| Self::Gt(v.clone())),
            FilterOperator::Gte => values.first().map(|v| Self::Gte(v.clone())),
            FilterOperator::In => (!values.is_empty()).then(|| Self::In(values.clone())),
            FilterOperator::Lt => values.first().map(|v| Self::Lt(v.clone())),
            FilterOperator::Lte => values.first().map(|v| Self::Lte(v.clone())),
            FilterOperator::Btw => match values.as_slice() {
                [low, high] => Some(Self::Between(low.clone(), high.clone())),
                _ => None,
            },
        }
    }

    /// Evaluate the predicate against a JSON scalar
    ///
    /// Comparisons are numeric when both sides parse as integers and
    /// lexicographic otherwise; JSON null, arrays, objects, and missing
    /// values never match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::repository::Predicate;
    /// use serde_json::json;
    ///
    /// assert!(Predicate::Like("ali".to_string()).matches(&json!("alice")));
    /// assert!(Predicate::Gt("9".to_string()).matches(&json!(10)));
    /// assert!(!Predicate::Gt("9".to_string()).matches(&json!(null)));
    /// ```
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        let Some(actual) = scalar_token(value) else {
            return false;
        };
        match self {
            Self::Eq(expected) => actual == *expected,
            Self::Like(needle) => actual.contains(needle.as_str()),
            Self::Ne(expected) => actual != *expected,
            Self::Gt(bound) => compare_tokens(&actual, bound) == Ordering::Greater,
            Self::Gte(bound) => compare_tokens(&actual, bound) != Ordering::Less,
            Self::In(expected) => expected.iter().any(|v| *v == actual),
            Self::Lt(bound) => compare_tokens(&actual, bound) == Ordering::Less,
            Self::Lte(bound) => compare_tokens(&actual, bound) != Ordering::Greater,
            Self::Between(low, high) => {
                compare_tokens(&actual, low) != Ordering::Less
                    && compare_tokens(&actual, high) != Ordering::Greater
            }
        }
    }
}

/// A predicate bound to a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    /// The column the predicate applies to
    pub field: String,
    /// The comparison
    pub predicate: Predicate,
}

/// Translate search clauses into field predicates
///
/// Fields outside `columns` are dropped entirely, clause order is kept,
/// and all resulting predicates combine with AND.
///
/// # Example
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use queryspec::query::{FilterOperator, SearchClause};
/// use queryspec::repository::{translate, Predicate};
///
/// let mut search = BTreeMap::new();
/// search.insert(
///     "status".to_string(),
///     vec![SearchClause::single(FilterOperator::Eq, "active")],
/// );
/// search.insert(
///     "ghost".to_string(),
///     vec![SearchClause::single(FilterOperator::Eq, "x")],
/// );
/// let columns: BTreeSet<String> = ["status".to_string()].into();
///
/// let predicates = translate(&search, &columns);
/// assert_eq!(predicates.len(), 1);
/// assert_eq!(predicates[0].predicate, Predicate::Eq("active".to_string()));
/// ```
#[must_use]
pub fn translate(
    search: &BTreeMap<String, Vec<SearchClause>>,
    columns: &BTreeSet<String>,
) -> Vec<FieldPredicate> {
    let mut predicates = Vec::new();
    for (field, clauses) in search {
        if !columns.contains(field) {
            continue;
        }
        for clause in clauses {
            if let Some(predicate) = Predicate::from_clause(clause) {
                predicates.push(FieldPredicate {
                    field: field.clone(),
                    predicate,
                });
            }
        }
    }
    predicates
}

/// Render a JSON scalar as a comparison token
pub(crate) fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Compare two tokens numerically when both parse as integers,
/// lexicographically otherwise
pub(crate) fn compare_tokens(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clause(operator: FilterOperator, values: &[&str]) -> SearchClause {
        SearchClause::new(operator, values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_every_operator_translates() {
        let cases = [
            (clause(FilterOperator::Eq, &["a"]), Predicate::Eq("a".into())),
            (
                clause(FilterOperator::Like, &["a"]),
                Predicate::Like("a".into()),
            ),
            (clause(FilterOperator::Ne, &["a"]), Predicate::Ne("a".into())),
            (clause(FilterOperator::Gt, &["1"]), Predicate::Gt("1".into())),
            (
                clause(FilterOperator::Gte, &["1"]),
                Predicate::Gte("1".into()),
            ),
            (
                clause(FilterOperator::In, &["a", "b"]),
                Predicate::In(vec!["a".into(), "b".into()]),
            ),
            (clause(FilterOperator::Lt, &["1"]), Predicate::Lt("1".into())),
            (
                clause(FilterOperator::Lte, &["1"]),
                Predicate::Lte("1".into()),
            ),
            (
                clause(FilterOperator::Btw, &["1", "9"]),
                Predicate::Between("1".into(), "9".into()),
            ),
        ];
        for (clause, expected) in cases {
            assert_eq!(Predicate::from_clause(&clause), Some(expected));
        }
    }

    #[test]
    fn test_malformed_clauses_yield_no_predicate() {
        assert_eq!(Predicate::from_clause(&clause(FilterOperator::Eq, &[])), None);
        assert_eq!(
            Predicate::from_clause(&clause(FilterOperator::Btw, &["1"])),
            None
        );
        assert_eq!(
            Predicate::from_clause(&clause(FilterOperator::Btw, &["1", "2", "3"])),
            None
        );
        assert_eq!(Predicate::from_clause(&clause(FilterOperator::In, &[])), None);
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let mut search = BTreeMap::new();
        search.insert(
            "email".to_string(),
            vec![clause(FilterOperator::Like, &["@example.com"])],
        );
        search.insert(
            "unknown".to_string(),
            vec![clause(FilterOperator::Eq, &["x"])],
        );
        let columns: BTreeSet<String> = ["email".to_string(), "name".to_string()].into();

        let predicates = translate(&search, &columns);
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].field, "email");
    }

    #[test]
    fn test_multiple_clauses_per_field_all_survive() {
        let mut search = BTreeMap::new();
        search.insert(
            "age".to_string(),
            vec![
                clause(FilterOperator::Gte, &["18"]),
                clause(FilterOperator::Lt, &["65"]),
            ],
        );
        let columns: BTreeSet<String> = ["age".to_string()].into();

        let predicates = translate(&search, &columns);
        assert_eq!(predicates.len(), 2);
        assert_eq!(predicates[0].predicate, Predicate::Gte("18".into()));
        assert_eq!(predicates[1].predicate, Predicate::Lt("65".into()));
    }

    #[test]
    fn test_matches_string_semantics() {
        assert!(Predicate::Eq("active".into()).matches(&json!("active")));
        assert!(!Predicate::Eq("active".into()).matches(&json!("inactive")));
        assert!(Predicate::Ne("active".into()).matches(&json!("archived")));
        assert!(Predicate::Like("lic".into()).matches(&json!("alice")));
        assert!(!Predicate::Like("bob".into()).matches(&json!("alice")));
        assert!(Predicate::In(vec!["a".into(), "b".into()]).matches(&json!("b")));
    }

    #[test]
    fn test_matches_numeric_comparison() {
        assert!(Predicate::Gt("9".into()).matches(&json!(10)));
        assert!(!Predicate::Gt("10".into()).matches(&json!(10)));
        assert!(Predicate::Gte("10".into()).matches(&json!(10)));
        assert!(Predicate::Lt("10".into()).matches(&json!(9)));
        assert!(Predicate::Lte("10".into()).matches(&json!(10)));
        assert!(Predicate::Between("5".into(), "10".into()).matches(&json!(5)));
        assert!(Predicate::Between("5".into(), "10".into()).matches(&json!(10)));
        assert!(!Predicate::Between("5".into(), "10".into()).matches(&json!(11)));
    }

    #[test]
    fn test_matches_numeric_not_lexicographic_for_numbers() {
        // "10" > "9" numerically even though it sorts lower as text.
        assert!(Predicate::Gt("9".into()).matches(&json!("10")));
    }

    #[test]
    fn test_non_scalar_values_never_match() {
        assert!(!Predicate::Eq("x".into()).matches(&json!(null)));
        assert!(!Predicate::Like("x".into()).matches(&json!(["x"])));
        assert!(!Predicate::Gt("1".into()).matches(&json!({"n": 2})));
    }
}
