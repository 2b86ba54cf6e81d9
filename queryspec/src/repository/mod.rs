//! Repository layer
//!
//! This module turns parsed query specifications into executed fetches
//! against a pluggable record store:
//!
//! - [`PaginationFilter`] carries the caller's intent (page, limit,
//!   projection, ordering, search clauses)
//! - [`StoreQuery`] is the validated plan: unknown fields are dropped and
//!   the offset is computed from page and limit
//! - [`RecordStore`] and [`TransactionalStore`] are the adapter seams a
//!   backend implements
//! - [`FilteredRepository`] executes plans and wraps paginated results in
//!   a [`Pagination`] envelope with [`PageMetadata`]
//!
//! # Example
//!
//! ```rust
//! use queryspec::repository::{FilteredRepository, PaginationFilter};
//! use queryspec::store::MemoryStore;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new(["id", "title"]);
//! let repo = FilteredRepository::new(&store);
//!
//! let row = json!({ "id": "1", "title": "hello" });
//! repo.create(row.as_object().unwrap().clone()).await?;
//!
//! let page = repo.paginate(&PaginationFilter::new().with_limit(5)).await?;
//! assert_eq!(page.metadata.total_items, 1);
//! assert!(!page.metadata.has_next_page);
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;
mod filtered;
mod pagination;
mod predicate;
mod query;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult};
pub use filter::PaginationFilter;
pub use filtered::FilteredRepository;
pub use pagination::{PageMetadata, Pagination};
pub use predicate::{translate, FieldPredicate, Predicate};
pub(crate) use predicate::{compare_tokens, scalar_token};
pub use query::StoreQuery;
pub use traits::{RecordStore, TransactionalStore};
