//! Record-store adapter contracts
//!
//! This module defines the traits a storage backend implements so the
//! repository layer can stay backend-agnostic. Methods use RPITIT (Return
//! Position Impl Trait In Traits), available since Rust 1.75, for ergonomic
//! async without `async_trait`.
//!
//! # Overview
//!
//! - [`RecordStore`]: fetch, count, and mutate records against a
//!   [`StoreQuery`]
//! - [`TransactionalStore`]: run a unit of work against an explicit
//!   transaction-scope handle
//!
//! # Example
//!
//! ```rust,ignore
//! use queryspec::repository::{RecordStore, RepositoryResult, StoreQuery};
//!
//! struct PgStore { /* pool, column set */ }
//!
//! impl RecordStore for PgStore {
//!     type Record = User;
//!     type Id = i64;
//!
//!     fn column_names(&self) -> &BTreeSet<String> {
//!         &self.columns
//!     }
//!
//!     async fn find(&self, query: &StoreQuery) -> RepositoryResult<Vec<User>> {
//!         // Render `query` into SQL and execute it
//!         todo!()
//!     }
//!     // ... other methods
//! }
//! ```

use std::collections::BTreeSet;
use std::future::Future;

use futures::future::BoxFuture;

use super::error::RepositoryResult;
use super::query::StoreQuery;

/// Backend adapter for one record type
///
/// The repository layer validates and translates; the store executes. All
/// query shaping (projection, predicates, offset/limit, order) arrives in
/// the [`StoreQuery`]; implementations must honor every part of it.
pub trait RecordStore: Send + Sync {
    /// The stored record type
    type Record: Send;
    /// The record identifier type
    type Id: Send + Sync;

    /// The entity's declared column names
    ///
    /// Used to intersect requested projections and drop unknown search
    /// fields before the query reaches the backend.
    fn column_names(&self) -> &BTreeSet<String>;

    /// Fetch all records matching the query
    fn find(
        &self,
        query: &StoreQuery,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Record>>> + Send;

    /// Fetch one page of records plus the total match count
    ///
    /// The count covers every matching record across all pages, not just
    /// the returned slice.
    fn find_and_count(
        &self,
        query: &StoreQuery,
    ) -> impl Future<Output = RepositoryResult<(Vec<Self::Record>, u64)>> + Send;

    /// Fetch the first record matching the query, if any
    fn find_one(
        &self,
        query: &StoreQuery,
    ) -> impl Future<Output = RepositoryResult<Option<Self::Record>>> + Send;

    /// Insert a new record, failing if its identifier is taken
    fn insert(
        &self,
        record: Self::Record,
    ) -> impl Future<Output = RepositoryResult<Self::Record>> + Send;

    /// Insert a batch of records
    fn insert_many(
        &self,
        records: Vec<Self::Record>,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Record>>> + Send;

    /// Insert or replace a record by its identifier
    fn save(
        &self,
        record: Self::Record,
    ) -> impl Future<Output = RepositoryResult<Self::Record>> + Send;

    /// Remove a record permanently
    fn delete(&self, id: &Self::Id) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Mark a record deleted without removing it; soft-deleted records are
    /// excluded from reads
    fn soft_delete(&self, id: &Self::Id) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Clear a record's soft-delete mark
    fn restore(&self, id: &Self::Id) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Store supporting units of work with explicit scope passing
///
/// The transaction boundary yields a scope handle and the callback runs
/// every operation against that handle; no shared repository instance is
/// ever rebound. An `Ok` return commits the scope's changes, an `Err`
/// aborts them and propagates unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let transferred = store
///     .transaction(|scope| {
///         Box::pin(async move {
///             let repo = FilteredRepository::new(scope);
///             repo.create(debit).await?;
///             repo.create(credit).await?;
///             Ok(())
///         })
///     })
///     .await?;
/// ```
pub trait TransactionalStore: RecordStore {
    /// The scoped-store handle the callback operates on
    type Scope: RecordStore<Record = Self::Record, Id = Self::Id>;

    /// Run `f` against a fresh transaction scope
    fn transaction<T, F>(&self, f: F) -> impl Future<Output = RepositoryResult<T>> + Send
    where
        T: Send,
        F: for<'s> FnOnce(&'s Self::Scope) -> BoxFuture<'s, RepositoryResult<T>> + Send;
}
