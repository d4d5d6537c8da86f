//! Book service

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All stored books, possibly none
    pub async fn get_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.find_all().await
    }

    /// Persist a new book and return it with its assigned id
    pub async fn store_book(&self, book: &NewBook) -> AppResult<Book> {
        let saved = self.repository.books.save(None, book).await?;
        tracing::info!("Stored book {} ({:?} by {:?})", saved.id, saved.title, saved.author);
        Ok(saved)
    }
}
