//! Raw request parameters
//!
//! [`QueryParams`] is the input boundary of the parser: a flat, ordered
//! mapping from parameter name to either a single string value or a nested
//! operator-to-value mapping. How the mapping is produced (query-string
//! decoding, framework extraction) is the caller's concern; the parser never
//! flattens nested syntax itself.

use serde_json::{Map, Value};

use super::error::ParseError;

/// Value of one request parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A plain string value, e.g. `page=2`
    Single(String),
    /// A nested operator mapping, e.g. `age[gt]=30`, in encounter order
    Nested(Vec<(String, String)>),
}

/// Ordered request-parameter mapping
///
/// Preserves encounter order of both top-level parameters and nested
/// operator entries, which determines clause order in the parsed search
/// specification. Duplicate top-level keys follow mapping semantics: the
/// last occurrence wins for flat lookups.
///
/// # Example
///
/// ```rust
/// use queryspec::query::QueryParams;
///
/// let params = QueryParams::new()
///     .with("page", "2")
///     .with("limit", "25")
///     .with_op("age", "gte", "18")
///     .with_op("age", "lt", "65");
///
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty parameter mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flat string parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .push((key.into(), ParamValue::Single(value.into())));
        self
    }

    /// Add an operator entry under a search field, creating the field on
    /// first use
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::query::{ParamValue, QueryParams};
    ///
    /// let params = QueryParams::new()
    ///     .with_op("status", "eq", "active")
    ///     .with_op("status", "ne", "archived");
    ///
    /// let Some(ParamValue::Nested(ops)) = params.get("status") else {
    ///     panic!("expected nested value");
    /// };
    /// assert_eq!(ops.len(), 2);
    /// ```
    #[must_use]
    pub fn with_op(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let entry = (operator.into(), value.into());
        match self.entries.iter_mut().find_map(|(key, value)| {
            (key == &field).then_some(value)
        }) {
            Some(ParamValue::Nested(ops)) => ops.push(entry),
            Some(single @ ParamValue::Single(_)) => *single = ParamValue::Nested(vec![entry]),
            None => self.entries.push((field, ParamValue::Nested(vec![entry]))),
        }
        self
    }

    /// Look up a parameter by name; the last occurrence wins
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .rev()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Iterate over all entries in encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a parameter mapping from a decoded JSON object
    ///
    /// String, number, and boolean scalars become flat values; one level of
    /// object nesting becomes an operator mapping. Arrays and deeper nesting
    /// are rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::query::QueryParams;
    ///
    /// let raw = serde_json::json!({
    ///     "page": "2",
    ///     "status": { "eq": "active" },
    /// });
    /// let params = QueryParams::from_json(raw.as_object().unwrap()).unwrap();
    /// assert_eq!(params.len(), 2);
    /// ```
    pub fn from_json(map: &Map<String, Value>) -> Result<Self, ParseError> {
        let mut params = Self::new();
        for (key, value) in map {
            match value {
                Value::Object(ops) => {
                    let mut nested = Vec::with_capacity(ops.len());
                    for (operator, raw) in ops {
                        let raw = scalar_string(raw).ok_or_else(|| {
                            ParseError::MalformedParameter { name: key.clone() }
                        })?;
                        nested.push((operator.clone(), raw));
                    }
                    params.entries.push((key.clone(), ParamValue::Nested(nested)));
                }
                other => {
                    let raw = scalar_string(other)
                        .ok_or_else(|| ParseError::MalformedParameter { name: key.clone() })?;
                    params.entries.push((key.clone(), ParamValue::Single(raw)));
                }
            }
        }
        Ok(params)
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
