//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, author = $3
            WHERE id = $1
            RETURNING id, title, author
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save(&self, id: Option<i64>, book: &NewBook) -> AppResult<Book> {
        if let Some(id) = id {
            if let Some(updated) = self.update(id, book).await? {
                return Ok(updated);
            }
            tracing::debug!("Book {} not found, inserting a new record", id);
        }
        self.insert(book).await
    }
}
