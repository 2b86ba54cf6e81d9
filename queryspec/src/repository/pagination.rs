//! Pagination result values
//!
//! [`PageMetadata`] describes where a page sits within the full result set;
//! [`Pagination`] bundles the fetched records with that metadata. Both are
//! derived values, never mutated after construction.

use serde::{Deserialize, Serialize};

/// Metadata for one page of results
///
/// `total_pages`, `has_next_page`, and `has_previous_page` are computed at
/// construction and stay consistent with `page`, `limit`, and `total_items`.
///
/// # Example
///
/// ```rust
/// use queryspec::repository::PageMetadata;
///
/// let metadata = PageMetadata::new(2, 10, 25);
/// assert_eq!(metadata.total_pages, 3);
/// assert!(metadata.has_next_page);
/// assert!(metadata.has_previous_page);
/// assert_eq!(metadata.offset(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total matching records across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a later page exists
    pub has_next_page: bool,
    /// Whether an earlier page exists
    pub has_previous_page: bool,
}

impl PageMetadata {
    /// Compute metadata from the page, limit, and total count
    ///
    /// A zero limit is clamped to 1 so the ceiling division stays defined.
    #[must_use]
    pub fn new(page: u32, limit: u32, total_items: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_pages(total_items, limit);
        Self {
            page,
            limit,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Metadata for an empty result set
    ///
    /// # Example
    ///
    /// ```rust
    /// use queryspec::repository::PageMetadata;
    ///
    /// let metadata = PageMetadata::empty(10);
    /// assert_eq!(metadata.total_pages, 0);
    /// assert!(!metadata.has_next_page);
    /// ```
    #[must_use]
    pub fn empty(limit: u32) -> Self {
        Self::new(1, limit, 0)
    }

    /// Number of records to skip to reach this page
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Ceiling division of `total_items` by `limit`, saturating at `u32::MAX`
fn total_pages(total_items: u64, limit: u32) -> u32 {
    let limit = u64::from(limit);
    let pages = total_items.saturating_add(limit).saturating_sub(1) / limit;
    pages.min(u64::from(u32::MAX)) as u32
}

/// One page of records plus its metadata
///
/// # Example
///
/// ```rust
/// use queryspec::repository::{PageMetadata, Pagination};
///
/// let page = Pagination::new(vec!["a", "b"], PageMetadata::new(1, 10, 2));
/// assert_eq!(page.data.len(), 2);
/// assert!(!page.metadata.has_next_page);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination<T> {
    /// The fetched records, in store order
    pub data: Vec<T>,
    /// Page metadata
    pub metadata: PageMetadata,
}

impl<T> Pagination<T> {
    /// Bundle records with their metadata
    #[must_use]
    pub fn new(data: Vec<T>, metadata: PageMetadata) -> Self {
        Self { data, metadata }
    }

    /// Map every record to a new type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> Pagination<U>
    where
        F: FnMut(T) -> U,
    {
        Pagination {
            data: self.data.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}
