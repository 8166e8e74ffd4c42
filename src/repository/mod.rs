//! Repository layer for document store operations

pub mod filter;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::AppResult,
};

pub use filter::BookFilter;
pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

/// Access to the book collection.
///
/// Reads hand back raw documents; shaping and validation happen in the model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Documents matching the filter, in store order
    async fn find(&self, filter: &BookFilter) -> AppResult<Vec<Document>>;

    /// Distinct string values of `genre`, sorted
    async fn distinct_genres(&self) -> AppResult<Vec<String>>;

    /// Insert a document without `_id` and return the identifier the store assigned
    async fn insert(&self, document: Document) -> AppResult<ObjectId>;

    /// Round-trip to the store to check connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the shared store handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Open the store selected by configuration
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let books: Arc<dyn BookStore> = match config.backend {
            StoreBackend::Mongo => Arc::new(MongoBookStore::connect(config).await?),
            StoreBackend::Memory => Arc::new(MemoryBookStore::new()),
        };
        Ok(Self::new(books))
    }
}
