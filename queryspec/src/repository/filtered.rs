//! Filtered repository
//!
//! [`FilteredRepository`] is the read/write surface over a record store: it
//! turns a [`PaginationFilter`] into a [`StoreQuery`], executes it, and for
//! paginated reads assembles a [`Pagination`] envelope. The CRUD methods are
//! thin passthroughs to the adapter.
//!
//! The repository borrows its store, so transaction scopes compose
//! naturally: inside a unit of work, construct the repository over the
//! scope handle instead of the outer store.

use tracing::debug;

use crate::config::{DEFAULT_LIMIT, DEFAULT_PAGE};

use super::error::RepositoryResult;
use super::filter::PaginationFilter;
use super::pagination::{PageMetadata, Pagination};
use super::query::StoreQuery;
use super::traits::RecordStore;

/// Repository applying parsed query specifications to a record store
///
/// # Example
///
/// ```rust
/// use queryspec::repository::{FilteredRepository, PaginationFilter};
/// use queryspec::store::MemoryStore;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new(["id", "name"]);
/// let repo = FilteredRepository::new(&store);
///
/// let row = json!({ "id": "1", "name": "alice" });
/// repo.create(row.as_object().unwrap().clone()).await?;
///
/// let page = repo.paginate(&PaginationFilter::new()).await?;
/// assert_eq!(page.metadata.total_items, 1);
/// # Ok(())
/// # }
/// ```
pub struct FilteredRepository<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> FilteredRepository<'a, S> {
    /// Create a repository over a store (or a transaction scope)
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch all records matching the filter, without a pagination envelope
    pub async fn find_all(&self, filter: &PaginationFilter) -> RepositoryResult<Vec<S::Record>> {
        let query = StoreQuery::from_filter(filter, self.store.column_names());
        self.store.find(&query).await
    }

    /// Fetch one page of records plus pagination metadata
    ///
    /// An unset page defaults to 1 and an unset limit to 10; both are
    /// forced into the executed query so the metadata always describes the
    /// fetch that actually ran.
    pub async fn paginate(
        &self,
        filter: &PaginationFilter,
    ) -> RepositoryResult<Pagination<S::Record>> {
        let page = filter.page.unwrap_or(DEFAULT_PAGE);
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT);

        let forced = filter.clone().with_page(page).with_limit(limit);
        let query = StoreQuery::from_filter(&forced, self.store.column_names());

        debug!(
            page,
            limit,
            conditions = query.conditions.len(),
            "executing paginated fetch"
        );
        let (data, total_items) = self.store.find_and_count(&query).await?;

        let metadata = PageMetadata::new(page, limit, total_items);
        Ok(Pagination::new(data, metadata))
    }

    /// Fetch the first record matching the query, if any
    pub async fn find_one(&self, query: &StoreQuery) -> RepositoryResult<Option<S::Record>> {
        self.store.find_one(query).await
    }

    /// Create a new record
    pub async fn create(&self, record: S::Record) -> RepositoryResult<S::Record> {
        self.store.insert(record).await
    }

    /// Create a batch of records
    pub async fn bulk_create(&self, records: Vec<S::Record>) -> RepositoryResult<Vec<S::Record>> {
        self.store.insert_many(records).await
    }

    /// Insert or replace a record
    pub async fn save(&self, record: S::Record) -> RepositoryResult<S::Record> {
        self.store.save(record).await
    }

    /// Remove a record permanently
    pub async fn delete(&self, id: &S::Id) -> RepositoryResult<()> {
        self.store.delete(id).await
    }

    /// Mark a record deleted without removing it
    pub async fn soft_delete(&self, id: &S::Id) -> RepositoryResult<()> {
        self.store.soft_delete(id).await
    }

    /// Clear a record's soft-delete mark
    pub async fn restore(&self, id: &S::Id) -> RepositoryResult<()> {
        self.store.restore(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterOperator, QueryParams, QueryParser, SearchClause, SortDirection};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn user_store() -> MemoryStore {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        MemoryStore::new(["id", "name", "email", "age", "status"])
    }

    async fn seed_users(store: &MemoryStore, count: u32) {
        let repo = FilteredRepository::new(store);
        for n in 1..=count {
            let row = json!({
                "id": n.to_string(),
                "name": format!("user{n:03}"),
                "email": format!("user{n:03}@example.com"),
                "age": 20 + (n % 40),
                "status": if n % 2 == 0 { "active" } else { "archived" },
            });
            repo.create(row.as_object().unwrap().clone()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_paginate_metadata_for_25_records() {
        let store = user_store();
        seed_users(&store, 25).await;
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new().with_page(2).with_limit(10);
        let page = repo.paginate(&filter).await.unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.metadata.page, 2);
        assert_eq!(page.metadata.limit, 10);
        assert_eq!(page.metadata.total_items, 25);
        assert_eq!(page.metadata.total_pages, 3);
        assert!(page.metadata.has_next_page);
        assert!(page.metadata.has_previous_page);
    }

    #[tokio::test]
    async fn test_paginate_defaults_page_and_limit() {
        let store = user_store();
        seed_users(&store, 25).await;
        let repo = FilteredRepository::new(&store);

        let page = repo.paginate(&PaginationFilter::new()).await.unwrap();
        assert_eq!(page.metadata.page, 1);
        assert_eq!(page.metadata.limit, 10);
        assert_eq!(page.data.len(), 10);
        assert!(!page.metadata.has_previous_page);
    }

    #[tokio::test]
    async fn test_paginate_last_partial_page() {
        let store = user_store();
        seed_users(&store, 25).await;
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new().with_page(3).with_limit(10);
        let page = repo.paginate(&filter).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert!(!page.metadata.has_next_page);
    }

    #[tokio::test]
    async fn test_paginate_empty_result() {
        let store = user_store();
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new()
            .with_search("status", SearchClause::single(FilterOperator::Eq, "nope"));
        let page = repo.paginate(&filter).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.metadata.total_items, 0);
        assert_eq!(page.metadata.total_pages, 0);
        assert!(!page.metadata.has_next_page);
    }

    #[tokio::test]
    async fn test_find_all_without_envelope() {
        let store = user_store();
        seed_users(&store, 7).await;
        let repo = FilteredRepository::new(&store);

        let rows = repo.find_all(&PaginationFilter::new()).await.unwrap();
        assert_eq!(rows.len(), 7);
    }

    #[tokio::test]
    async fn test_search_filter_narrows_results() {
        let store = user_store();
        seed_users(&store, 10).await;
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new()
            .with_search("status", SearchClause::single(FilterOperator::Eq, "active"));
        let page = repo.paginate(&filter).await.unwrap();
        assert_eq!(page.metadata.total_items, 5);
        assert!(page
            .data
            .iter()
            .all(|row| row["status"] == json!("active")));
    }

    #[tokio::test]
    async fn test_field_projection_drops_unknown_names() {
        let store = user_store();
        seed_users(&store, 3).await;
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new()
            .with_fields(vec!["name".to_string(), "password".to_string()]);
        let page = repo.paginate(&filter).await.unwrap();
        for row in &page.data {
            assert!(row.contains_key("name"));
            assert!(!row.contains_key("email"));
            assert!(!row.contains_key("password"));
        }
    }

    #[tokio::test]
    async fn test_order_applies_before_pagination() {
        let store = user_store();
        seed_users(&store, 12).await;
        let repo = FilteredRepository::new(&store);

        let filter = PaginationFilter::new()
            .with_limit(3)
            .with_order("name", SortDirection::Desc);
        let page = repo.paginate(&filter).await.unwrap();
        let names: Vec<_> = page
            .data
            .iter()
            .map(|row| row["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["user012", "user011", "user010"]);
    }

    #[tokio::test]
    async fn test_parsed_request_end_to_end() {
        let store = user_store();
        seed_users(&store, 25).await;
        let repo = FilteredRepository::new(&store);

        let params = QueryParams::new()
            .with("page", "1")
            .with("limit", "5")
            .with("order", "age:ASC")
            .with_op("age", "btw", "30,45");
        let query = QueryParser::default().parse(&params).unwrap();
        let page = repo.paginate(&query.into()).await.unwrap();

        assert!(page.data.len() <= 5);
        assert!(page.data.iter().all(|row| {
            let age = row["age"].as_u64().unwrap();
            (30..=45).contains(&age)
        }));
    }

    #[tokio::test]
    async fn test_crud_passthroughs() {
        let store = user_store();
        let repo = FilteredRepository::new(&store);

        let rows: Vec<_> = (1..=3)
            .map(|n| {
                json!({ "id": n.to_string(), "name": format!("u{n}") })
                    .as_object()
                    .unwrap()
                    .clone()
            })
            .collect();
        repo.bulk_create(rows).await.unwrap();

        let mut updated = json!({ "id": "2", "name": "renamed" })
            .as_object()
            .unwrap()
            .clone();
        updated = repo.save(updated).await.unwrap();
        assert_eq!(updated["name"], json!("renamed"));

        repo.delete(&"3".to_string()).await.unwrap();
        let rows = repo.find_all(&PaginationFilter::new()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_and_restore_reveals() {
        let store = user_store();
        seed_users(&store, 4).await;
        let repo = FilteredRepository::new(&store);

        repo.soft_delete(&"1".to_string()).await.unwrap();
        let page = repo.paginate(&PaginationFilter::new()).await.unwrap();
        assert_eq!(page.metadata.total_items, 3);

        repo.restore(&"1".to_string()).await.unwrap();
        let page = repo.paginate(&PaginationFilter::new()).await.unwrap();
        assert_eq!(page.metadata.total_items, 4);
    }
}
