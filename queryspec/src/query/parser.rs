//! Request-parameter parsing
//!
//! [`QueryParser`] turns an untyped [`QueryParams`] mapping into a validated
//! [`PaginationQuery`]. All input validation happens here; downstream query
//! building assumes validated input and performs none of its own.
//!
//! # Example
//!
//! ```rust
//! use queryspec::query::{FilterOperator, QueryParams, QueryParser};
//!
//! let params = QueryParams::new()
//!     .with("page", "2")
//!     .with("limit", "25")
//!     .with("fields", "name,email")
//!     .with("order", "name:ASC")
//!     .with_op("ids", "in", "1,2,3");
//!
//! let query = QueryParser::default().parse(&params).unwrap();
//! assert_eq!(query.page, 2);
//! assert_eq!(query.limit, 25);
//! assert_eq!(query.fields, vec!["name", "email"]);
//! assert_eq!(query.search["ids"][0].operator, FilterOperator::In);
//! assert_eq!(query.search["ids"][0].values, vec!["1", "2", "3"]);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::ParserConfig;

use super::error::ParseError;
use super::operator::FilterOperator;
use super::params::{ParamValue, QueryParams};
use super::spec::{PaginationQuery, SearchClause, SortDirection};

/// Top-level keys that are never treated as search fields
const RESERVED_KEYS: [&str; 4] = ["page", "limit", "fields", "order"];

static UNSIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid literal pattern"));

/// Parser from flat request parameters to a [`PaginationQuery`]
///
/// Stateless and deterministic: parsing equal inputs yields structurally
/// equal specifications. The default parser uses the standard bounds
/// (page >= 1, limit in 1..=50, defaults 1 and 10); construct one from a
/// [`ParserConfig`] to change them.
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    config: ParserConfig,
}

impl QueryParser {
    /// Create a parser with explicit bounds
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a parameter mapping into a validated specification
    ///
    /// Absent parameters fall back to defaults; malformed ones fail fast
    /// with a [`ParseError`] describing the first problem found.
    pub fn parse(&self, params: &QueryParams) -> Result<PaginationQuery, ParseError> {
        let query = PaginationQuery {
            page: self.parse_page(params)?,
            limit: self.parse_limit(params)?,
            fields: parse_fields(params)?,
            order: parse_order(params)?,
            search: parse_search(params)?,
        };
        debug!(
            page = query.page,
            limit = query.limit,
            search_fields = query.search.len(),
            "parsed query specification"
        );
        Ok(query)
    }

    fn parse_page(&self, params: &QueryParams) -> Result<u32, ParseError> {
        let Some(value) = params.get("page") else {
            return Ok(self.config.default_page);
        };
        let ParamValue::Single(raw) = value else {
            return Err(ParseError::MalformedParameter {
                name: "page".to_string(),
            });
        };
        if !UNSIGNED_INTEGER.is_match(raw) {
            return Err(ParseError::PageNotNumeric);
        }
        let page: u32 = raw.parse().map_err(|_| ParseError::PageOutOfRange)?;
        if page < 1 {
            return Err(ParseError::PageOutOfRange);
        }
        Ok(page)
    }

    fn parse_limit(&self, params: &QueryParams) -> Result<u32, ParseError> {
        let Some(value) = params.get("limit") else {
            return Ok(self.config.default_limit);
        };
        let ParamValue::Single(raw) = value else {
            return Err(ParseError::MalformedParameter {
                name: "limit".to_string(),
            });
        };
        if !UNSIGNED_INTEGER.is_match(raw) {
            return Err(ParseError::LimitNotNumeric);
        }
        let limit: u32 = raw.parse().map_err(|_| ParseError::LimitTooLarge {
            max: self.config.max_limit,
        })?;
        if limit < 1 {
            return Err(ParseError::LimitTooSmall);
        }
        if limit > self.config.max_limit {
            return Err(ParseError::LimitTooLarge {
                max: self.config.max_limit,
            });
        }
        Ok(limit)
    }
}

fn parse_fields(params: &QueryParams) -> Result<Vec<String>, ParseError> {
    let Some(value) = params.get("fields") else {
        return Ok(Vec::new());
    };
    let ParamValue::Single(raw) = value else {
        return Err(ParseError::MalformedParameter {
            name: "fields".to_string(),
        });
    };
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(raw.split(',').map(str::to_string).collect())
}

fn parse_order(params: &QueryParams) -> Result<Vec<(String, SortDirection)>, ParseError> {
    let Some(value) = params.get("order") else {
        return Ok(Vec::new());
    };
    let ParamValue::Single(raw) = value else {
        return Err(ParseError::MalformedParameter {
            name: "order".to_string(),
        });
    };
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut order: Vec<(String, SortDirection)> = Vec::new();
    for token in raw.split(',') {
        let (field, direction) = match token.split_once(':') {
            Some((field, direction)) => (field, SortDirection::from_str(direction)?),
            None => {
                return Err(ParseError::InvalidSortDirection(String::new()));
            }
        };
        // Duplicate fields overwrite in place, keeping first-seen position.
        match order.iter_mut().find(|(existing, _)| existing == field) {
            Some(entry) => entry.1 = direction,
            None => order.push((field.to_string(), direction)),
        }
    }
    Ok(order)
}

fn parse_search(params: &QueryParams) -> Result<BTreeMap<String, Vec<SearchClause>>, ParseError> {
    let mut search: BTreeMap<String, Vec<SearchClause>> = BTreeMap::new();

    for (key, value) in params.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        let ParamValue::Nested(operators) = value else {
            return Err(ParseError::MalformedParameter {
                name: key.to_string(),
            });
        };

        let clauses = search.entry(key.to_string()).or_default();
        for (operator, raw) in operators {
            let operator = FilterOperator::from_str(operator)?;
            clauses.push(parse_clause(operator, raw)?);
        }
    }
    Ok(search)
}

fn parse_clause(operator: FilterOperator, raw: &str) -> Result<SearchClause, ParseError> {
    match operator {
        FilterOperator::Eq | FilterOperator::Like | FilterOperator::Ne => {
            Ok(SearchClause::single(operator, raw))
        }
        FilterOperator::Gt | FilterOperator::Gte | FilterOperator::Lt | FilterOperator::Lte => {
            if !UNSIGNED_INTEGER.is_match(raw) {
                return Err(ParseError::NonNumericValue { operator });
            }
            Ok(SearchClause::single(operator, raw))
        }
        FilterOperator::In => Ok(SearchClause::new(
            operator,
            raw.split(',').map(str::to_string).collect(),
        )),
        FilterOperator::Btw => {
            let bounds: Vec<&str> = raw.split(',').collect();
            if bounds.len() != 2 {
                return Err(ParseError::BetweenArity);
            }
            for bound in &bounds {
                if !UNSIGNED_INTEGER.is_match(bound) {
                    return Err(ParseError::NonNumericValue { operator });
                }
            }
            Ok(SearchClause::new(
                operator,
                bounds.into_iter().map(str::to_string).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(params: &QueryParams) -> Result<PaginationQuery, ParseError> {
        QueryParser::default().parse(params)
    }

    #[test]
    fn test_defaults_when_absent() {
        let query = parse(&QueryParams::new()).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.fields.is_empty());
        assert!(query.order.is_empty());
        assert!(query.search.is_empty());
    }

    #[test]
    fn test_valid_page_and_limit_round_trip() {
        for (page, limit) in [(1, 1), (7, 25), (9999, 50)] {
            let params = QueryParams::new()
                .with("page", page.to_string())
                .with("limit", limit.to_string());
            let query = parse(&params).unwrap();
            assert_eq!(query.page, page);
            assert_eq!(query.limit, limit);
        }
    }

    #[test]
    fn test_page_rejections() {
        for raw in ["0", "-1", "abc", "1.5", " 2"] {
            let params = QueryParams::new().with("page", raw);
            let err = parse(&params).unwrap_err();
            assert!(
                matches!(err, ParseError::PageNotNumeric | ParseError::PageOutOfRange),
                "page {raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_page_overflow_rejected() {
        let params = QueryParams::new().with("page", "99999999999999999999");
        assert_eq!(parse(&params).unwrap_err(), ParseError::PageOutOfRange);
    }

    #[test]
    fn test_limit_rejections_are_distinct() {
        let params = QueryParams::new().with("limit", "51");
        assert_eq!(
            parse(&params).unwrap_err(),
            ParseError::LimitTooLarge { max: 50 }
        );

        let params = QueryParams::new().with("limit", "0");
        assert_eq!(parse(&params).unwrap_err(), ParseError::LimitTooSmall);

        let params = QueryParams::new().with("limit", "ten");
        assert_eq!(parse(&params).unwrap_err(), ParseError::LimitNotNumeric);
    }

    #[test]
    fn test_limit_boundary_values() {
        let params = QueryParams::new().with("limit", "50");
        assert_eq!(parse(&params).unwrap().limit, 50);

        let params = QueryParams::new().with("limit", "1");
        assert_eq!(parse(&params).unwrap().limit, 1);
    }

    #[test]
    fn test_fields_split_on_comma() {
        let params = QueryParams::new().with("fields", "name,email,created_at");
        assert_eq!(
            parse(&params).unwrap().fields,
            vec!["name", "email", "created_at"]
        );
    }

    #[test]
    fn test_empty_fields_means_unrestricted() {
        let params = QueryParams::new().with("fields", "");
        assert!(parse(&params).unwrap().fields.is_empty());
    }

    #[test]
    fn test_order_parses_directions() {
        let params = QueryParams::new().with("order", "name:ASC,age:DESC");
        let query = parse(&params).unwrap();
        assert_eq!(
            query.order,
            vec![
                ("name".to_string(), SortDirection::Asc),
                ("age".to_string(), SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn test_order_rejects_bad_direction() {
        for raw in ["name:UP", "name:asc", "name"] {
            let params = QueryParams::new().with("order", raw);
            assert!(
                matches!(
                    parse(&params).unwrap_err(),
                    ParseError::InvalidSortDirection(_)
                ),
                "order {raw:?} should have been rejected"
            );
        }
    }

    #[test]
    fn test_order_duplicate_field_overwrites_in_place() {
        let params = QueryParams::new().with("order", "name:ASC,age:DESC,name:DESC");
        let query = parse(&params).unwrap();
        assert_eq!(
            query.order,
            vec![
                ("name".to_string(), SortDirection::Desc),
                ("age".to_string(), SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn test_search_eq_clause() {
        let params = QueryParams::new().with_op("status", "eq", "active");
        let query = parse(&params).unwrap();
        assert_eq!(
            query.search["status"],
            vec![SearchClause::single(FilterOperator::Eq, "active")]
        );
    }

    #[test]
    fn test_search_verbatim_operators_keep_value() {
        let params = QueryParams::new()
            .with_op("name", "like", "ali")
            .with_op("status", "ne", "archived");
        let query = parse(&params).unwrap();
        assert_eq!(query.search["name"][0].values, vec!["ali"]);
        assert_eq!(query.search["status"][0].operator, FilterOperator::Ne);
    }

    #[test]
    fn test_search_numeric_operator_rejects_text() {
        let params = QueryParams::new().with_op("age", "gt", "abc");
        assert_eq!(
            parse(&params).unwrap_err(),
            ParseError::NonNumericValue {
                operator: FilterOperator::Gt
            }
        );
    }

    #[test]
    fn test_search_all_numeric_operators_validate() {
        for op in ["gt", "gte", "lt", "lte"] {
            let params = QueryParams::new().with_op("age", op, "12,5");
            assert!(parse(&params).is_err(), "operator {op} accepted a comma");

            let params = QueryParams::new().with_op("age", op, "42");
            assert!(parse(&params).is_ok(), "operator {op} rejected digits");
        }
    }

    #[test]
    fn test_search_in_splits_without_numeric_check() {
        let params = QueryParams::new().with_op("ids", "in", "1,2,3");
        let query = parse(&params).unwrap();
        assert_eq!(query.search["ids"][0].values, vec!["1", "2", "3"]);

        let params = QueryParams::new().with_op("status", "in", "active,archived");
        assert!(parse(&params).is_ok());
    }

    #[test]
    fn test_search_btw_accepts_two_numeric_bounds() {
        let params = QueryParams::new().with_op("age", "btw", "5,10");
        let query = parse(&params).unwrap();
        assert_eq!(
            query.search["age"],
            vec![SearchClause::new(
                FilterOperator::Btw,
                vec!["5".to_string(), "10".to_string()]
            )]
        );
    }

    #[test]
    fn test_search_btw_arity_enforced() {
        for raw in ["5", "5,10,15", ""] {
            let params = QueryParams::new().with_op("age", "btw", raw);
            assert_eq!(parse(&params).unwrap_err(), ParseError::BetweenArity);
        }
    }

    #[test]
    fn test_search_btw_bounds_must_be_numeric() {
        let params = QueryParams::new().with_op("age", "btw", "5,ten");
        assert_eq!(
            parse(&params).unwrap_err(),
            ParseError::NonNumericValue {
                operator: FilterOperator::Btw
            }
        );
    }

    #[test]
    fn test_search_unknown_operator_rejected() {
        let params = QueryParams::new().with_op("status", "matches", "active");
        let err = parse(&params).unwrap_err();
        assert!(matches!(err, ParseError::UnknownOperator { ref operator } if operator == "matches"));
    }

    #[test]
    fn test_search_clauses_accumulate_in_encounter_order() {
        let params = QueryParams::new()
            .with_op("age", "gte", "18")
            .with_op("age", "lt", "65");
        let query = parse(&params).unwrap();
        let clauses = &query.search["age"];
        assert_eq!(clauses[0].operator, FilterOperator::Gte);
        assert_eq!(clauses[1].operator, FilterOperator::Lt);
    }

    #[test]
    fn test_search_field_with_no_operators_keeps_empty_clause_list() {
        let raw = serde_json::json!({ "ghost": {} });
        let params = QueryParams::from_json(raw.as_object().unwrap()).unwrap();
        let query = parse(&params).unwrap();
        assert_eq!(query.search.get("ghost"), Some(&Vec::new()));
    }

    #[test]
    fn test_flat_value_under_search_key_is_malformed() {
        let params = QueryParams::new().with("status", "active");
        assert!(matches!(
            parse(&params).unwrap_err(),
            ParseError::MalformedParameter { ref name } if name == "status"
        ));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let params = QueryParams::new()
            .with("page", "3")
            .with("order", "name:ASC")
            .with_op("age", "btw", "18,65")
            .with_op("status", "in", "active,pending");
        let first = parse(&params).unwrap();
        let second = parse(&params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_bounds_from_config() {
        let parser = QueryParser::new(ParserConfig {
            default_page: 1,
            default_limit: 20,
            max_limit: 100,
        });

        let query = parser.parse(&QueryParams::new()).unwrap();
        assert_eq!(query.limit, 20);

        let params = QueryParams::new().with("limit", "100");
        assert_eq!(parser.parse(&params).unwrap().limit, 100);

        let params = QueryParams::new().with("limit", "101");
        assert_eq!(
            parser.parse(&params).unwrap_err(),
            ParseError::LimitTooLarge { max: 100 }
        );
    }
}
