//! # queryspec
//!
//! Query-specification engine for list endpoints: parse flat request
//! parameters into a validated pagination query, then execute that query
//! against any record store through a filtered repository.
//!
//! The crate has two halves joined by a small data model:
//!
//! - **Parsing** ([`query`]): [`QueryParser`](query::QueryParser) turns raw
//!   string parameters (`page`, `limit`, `fields`, `order`, plus
//!   field/operator search entries) into a
//!   [`PaginationQuery`](query::PaginationQuery), rejecting malformed input
//!   with a precise [`ParseError`](query::ParseError). Nine search
//!   operators are supported: `eq`, `like`, `ne`, `gt`, `gte`, `in`, `lt`,
//!   `lte`, and `btw`; the magnitude operators only accept unsigned
//!   integers.
//! - **Execution** ([`repository`]): [`FilteredRepository`](repository::FilteredRepository)
//!   validates the requested fields against the store's columns, translates
//!   search clauses into predicates, computes the offset, and wraps
//!   paginated results in a [`Pagination`](repository::Pagination) envelope
//!   with [`PageMetadata`](repository::PageMetadata).
//!
//! Backends plug in by implementing [`RecordStore`](repository::RecordStore);
//! the bundled [`MemoryStore`](store::MemoryStore) is a complete reference
//! adapter, including scoped transactions via
//! [`TransactionalStore`](repository::TransactionalStore).
//!
//! ## Quick Start
//!
//! ```rust
//! use queryspec::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // A request like GET /users?page=1&limit=2&order=age:DESC&age[gte]=18
//! let params = QueryParams::new()
//!     .with("page", "1")
//!     .with("limit", "2")
//!     .with("order", "age:DESC")
//!     .with_op("age", "gte", "18");
//! let query = QueryParser::default().parse(&params)?;
//!
//! let store = MemoryStore::new(["id", "name", "age"]);
//! let repo = FilteredRepository::new(&store);
//! for (id, name, age) in [("1", "ana", 34), ("2", "bo", 12), ("3", "cleo", 57)] {
//!     let row = json!({ "id": id, "name": name, "age": age });
//!     repo.create(row.as_object().unwrap().clone()).await?;
//! }
//!
//! let page = repo.paginate(&query.into()).await?;
//! assert_eq!(page.metadata.total_items, 2);
//! assert_eq!(page.data[0]["name"], json!("cleo"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Parser defaults (default page, default limit, maximum limit) come from
//! [`ParserConfig`](config::ParserConfig), loadable from `queryspec.toml`
//! and `QUERYSPEC_*` environment variables.

pub mod config;
pub mod query;
pub mod repository;
pub mod store;

/// Convenience re-exports for the common usage path
pub mod prelude {
    pub use crate::config::ParserConfig;
    pub use crate::query::{
        FilterOperator, PaginationQuery, ParamValue, ParseError, QueryParams, QueryParser,
        SearchClause, SortDirection,
    };
    pub use crate::repository::{
        FilteredRepository, PageMetadata, Pagination, PaginationFilter, RecordStore,
        RepositoryError, RepositoryResult, StoreQuery, TransactionalStore,
    };
    pub use crate::store::MemoryStore;
}
