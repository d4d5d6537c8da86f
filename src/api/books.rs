//! Book API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

use super::ValidatedJson;

/// List all books
///
/// Responds 404 when no book has been stored yet.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Found books", body = Vec<Book>,
            example = json!([{"id": 1, "title": "New Book", "author": "John Doe"}])),
        (status = 404, description = "Did not find any books")
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_books().await?;
    if books.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body(content = NewBook, description = "Book to create",
        example = json!({"title": "New Book", "author": "John Doe"})),
    responses(
        (status = 201, description = "Book created successfully", body = Book),
        (status = 400, description = "Invalid input provided",
            body = crate::models::problem::ValidationProblem, content_type = "application/problem+json")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(book): ValidatedJson<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.store_book(&book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}
