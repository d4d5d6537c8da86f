//! In-memory book store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

#[derive(Default)]
struct Books {
    last_id: i64,
    by_id: BTreeMap<i64, Book>,
}

/// Book store kept in process memory; ids start at 1
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Books>,
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books.by_id.values().cloned().collect())
    }

    async fn save(&self, id: Option<i64>, book: &NewBook) -> AppResult<Book> {
        let mut books = self.books.write().await;

        let id = match id {
            Some(id) if books.by_id.contains_key(&id) => id,
            _ => {
                books.last_id += 1;
                books.last_id
            }
        };

        let saved = Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
        };
        books.by_id.insert(id, saved.clone());
        Ok(saved)
    }
}
