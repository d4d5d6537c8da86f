//! Repository layer for book persistence

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Persistence boundary for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All stored books, ordered by id
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Insert a book, or update the one matching `id`.
    ///
    /// An `id` that matches no record inserts a new book under a freshly
    /// generated id.
    async fn save(&self, id: Option<i64>, book: &NewBook) -> AppResult<Book>;
}

/// Main repository struct holding the configured stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(books::PgBookStore::new(pool)))
    }

    /// Create a repository backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::MemoryBookStore::default()))
    }
}
