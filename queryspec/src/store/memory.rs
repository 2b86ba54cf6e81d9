//! In-memory record store
//!
//! [`MemoryStore`] keeps rows as JSON objects behind a [`RwLock`] and
//! implements the full [`RecordStore`] and [`TransactionalStore`] surface.
//! It backs the crate's tests and doctests and doubles as a reference for
//! adapter authors: every query feature (projection, predicates, ordering,
//! offset paging, soft deletes, scoped transactions) is executed here in
//! plain code.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Utc;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::trace;

use crate::repository::{
    compare_tokens, scalar_token, RecordStore, RepositoryError, RepositoryOperation,
    RepositoryResult, StoreQuery, TransactionalStore,
};
use crate::query::SortDirection;

/// Column recording the soft-delete timestamp; absent or null means live.
const DELETED_AT: &str = "deleted_at";

/// Record store holding JSON rows in memory
///
/// Rows are identified by their `"id"` member, compared as a string.
pub struct MemoryStore {
    columns: BTreeSet<String>,
    rows: RwLock<Vec<Map<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store whose records carry the given columns
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: RwLock::new(Vec::new()),
        }
    }

    fn record_id(record: &Map<String, Value>) -> Option<String> {
        record.get("id").and_then(scalar_token)
    }

    fn is_live(row: &Map<String, Value>) -> bool {
        matches!(row.get(DELETED_AT), None | Some(Value::Null))
    }

    /// Run the full query pipeline over a snapshot of the rows.
    ///
    /// Returns the selected page plus the match count before offset and
    /// limit were applied.
    fn execute(rows: &[Map<String, Value>], query: &StoreQuery) -> (Vec<Map<String, Value>>, u64) {
        let mut matched: Vec<&Map<String, Value>> = rows
            .iter()
            .filter(|row| Self::is_live(row))
            .filter(|row| {
                query.conditions.iter().all(|condition| {
                    row.get(&condition.field)
                        .is_some_and(|value| condition.predicate.matches(value))
                })
            })
            .collect();

        if !query.order.is_empty() {
            matched.sort_by(|a, b| Self::compare_rows(a, b, &query.order));
        }
        let total = matched.len() as u64;

        let offset = query.offset.unwrap_or(0) as usize;
        let page: Vec<Map<String, Value>> = matched
            .into_iter()
            .skip(offset)
            .take(query.limit.map_or(usize::MAX, |l| l as usize))
            .map(|row| Self::project(row, &query.select))
            .collect();

        (page, total)
    }

    fn compare_rows(
        a: &Map<String, Value>,
        b: &Map<String, Value>,
        order: &[(String, SortDirection)],
    ) -> Ordering {
        for (field, direction) in order {
            let left = a.get(field).and_then(scalar_token);
            let right = b.get(field).and_then(scalar_token);
            let ordering = match (left, right) {
                (Some(l), Some(r)) => compare_tokens(&l, &r),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    fn project(row: &Map<String, Value>, select: &[String]) -> Map<String, Value> {
        if select.is_empty() {
            return row.clone();
        }
        select
            .iter()
            .filter_map(|field| row.get(field).map(|value| (field.clone(), value.clone())))
            .collect()
    }
}

impl RecordStore for MemoryStore {
    type Record = Map<String, Value>;
    type Id = String;

    fn column_names(&self) -> &BTreeSet<String> {
        &self.columns
    }

    async fn find(&self, query: &StoreQuery) -> RepositoryResult<Vec<Self::Record>> {
        let rows = self.rows.read().await;
        let (page, _) = Self::execute(&rows, query);
        trace!(matched = page.len(), "fetched rows");
        Ok(page)
    }

    async fn find_and_count(
        &self,
        query: &StoreQuery,
    ) -> RepositoryResult<(Vec<Self::Record>, u64)> {
        let rows = self.rows.read().await;
        Ok(Self::execute(&rows, query))
    }

    async fn find_one(&self, query: &StoreQuery) -> RepositoryResult<Option<Self::Record>> {
        let rows = self.rows.read().await;
        let (page, _) = Self::execute(&rows, query);
        Ok(page.into_iter().next())
    }

    async fn insert(&self, record: Self::Record) -> RepositoryResult<Self::Record> {
        let id = Self::record_id(&record)
            .ok_or_else(|| RepositoryError::validation_failed("record is missing an id"))?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| Self::record_id(row).as_deref() == Some(&id)) {
            return Err(RepositoryError::already_exists("record", id));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn insert_many(
        &self,
        records: Vec<Self::Record>,
    ) -> RepositoryResult<Vec<Self::Record>> {
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            inserted.push(
                self.insert(record)
                    .await
                    .map_err(|e| e.with_operation(RepositoryOperation::BulkCreate))?,
            );
        }
        Ok(inserted)
    }

    async fn save(&self, record: Self::Record) -> RepositoryResult<Self::Record> {
        let id = Self::record_id(&record).ok_or_else(|| {
            RepositoryError::validation_failed("record is missing an id")
                .with_operation(RepositoryOperation::Save)
        })?;
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|row| Self::record_id(row).as_deref() == Some(&id))
        {
            Some(existing) => *existing = record.clone(),
            None => rows.push(record.clone()),
        }
        Ok(record)
    }

    async fn delete(&self, id: &Self::Id) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| Self::record_id(row).as_deref() != Some(id));
        if rows.len() == before {
            return Err(RepositoryError::not_found("record", id)
                .with_operation(RepositoryOperation::Delete));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: &Self::Id) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| Self::record_id(row).as_deref() == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found("record", id)
                    .with_operation(RepositoryOperation::SoftDelete)
            })?;
        row.insert(
            DELETED_AT.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        Ok(())
    }

    async fn restore(&self, id: &Self::Id) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| Self::record_id(row).as_deref() == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found("record", id)
                    .with_operation(RepositoryOperation::Restore)
            })?;
        row.remove(DELETED_AT);
        Ok(())
    }
}

impl TransactionalStore for MemoryStore {
    type Scope = MemoryStore;

    /// Run `f` against a scope holding a snapshot of the current rows.
    ///
    /// The callback's writes land in the snapshot only; they are adopted
    /// back into this store when the callback returns `Ok` and discarded
    /// otherwise.
    async fn transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send,
        F: for<'s> FnOnce(&'s Self::Scope) -> BoxFuture<'s, RepositoryResult<T>> + Send,
    {
        let snapshot = self.rows.read().await.clone();
        let scope = MemoryStore {
            columns: self.columns.clone(),
            rows: RwLock::new(snapshot),
        };
        let value = f(&scope).await?;
        *self.rows.write().await = scope.rows.into_inner();
        trace!("transaction committed");
        Ok(value)
    }
}
