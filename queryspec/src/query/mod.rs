//! Query-specification parsing
//!
//! This module turns untyped, flat request parameters into a validated
//! [`PaginationQuery`]: page, limit, requested fields, sort order, and
//! per-field search clauses.
//!
//! # Overview
//!
//! - [`QueryParams`]: the ordered raw-parameter mapping (input boundary)
//! - [`QueryParser`]: the validating parser
//! - [`PaginationQuery`], [`SearchClause`], [`SortDirection`],
//!   [`FilterOperator`]: the parsed specification values
//! - [`ParseError`]: client-fault validation errors
//!
//! # Example
//!
//! ```rust
//! use queryspec::query::{QueryParams, QueryParser};
//!
//! let params = QueryParams::new()
//!     .with("page", "2")
//!     .with("limit", "10")
//!     .with_op("status", "eq", "active");
//!
//! let query = QueryParser::default().parse(&params).unwrap();
//! assert_eq!(query.page, 2);
//! assert_eq!(query.search["status"][0].values, vec!["active"]);
//! ```

mod error;
mod operator;
mod params;
mod parser;
mod spec;

pub use error::ParseError;
pub use operator::FilterOperator;
pub use params::{ParamValue, QueryParams};
pub use parser::QueryParser;
pub use spec::{PaginationQuery, SearchClause, SortDirection};
