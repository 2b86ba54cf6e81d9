//! Record store adapters
//!
//! Backends implement [`RecordStore`](crate::repository::RecordStore) (and
//! optionally [`TransactionalStore`](crate::repository::TransactionalStore))
//! to plug into the repository layer. This module ships the in-memory
//! adapter used throughout the crate's tests and documentation.

mod memory;

pub use memory::MemoryStore;
