//! Book (catalog) endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{AuthorSearch, Book, BookMetadata, BookPatch, BookQuery, BookResponse, TitleSearch},
    AppState,
};

use super::{JsonBody, PathParam, QueryParams};

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BookQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.list(&query).await)
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(book): JsonBody<Book>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let created = state.services.catalog.insert(book).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::new("Libro creado", created))))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(book): JsonBody<Book>,
) -> AppResult<Json<BookResponse>> {
    let updated = state.services.catalog.replace(id, book).await?;
    Ok(Json(BookResponse::new("Libro actualizado", updated)))
}

/// Overwrite selected fields of a book (values are not validated)
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book partially updated", body = BookResponse),
        (status = 400, description = "Value of the wrong type", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn patch_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<BookPatch>,
) -> AppResult<Json<BookResponse>> {
    let updated = state.services.catalog.patch_fields(id, patch).await?;
    Ok(Json(BookResponse::new("Libro actualizado parcialmente", updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<BookResponse>> {
    let removed = state.services.catalog.delete(id).await?;
    Ok(Json(BookResponse::new("Libro eliminado", removed)))
}

/// Search books by title (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/books/search/title",
    tag = "search",
    params(TitleSearch),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_by_title(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TitleSearch>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.search_by_title(&query.title).await)
}

/// Search books by author (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/books/search/author",
    tag = "search",
    params(AuthorSearch),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_by_author(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AuthorSearch>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.search_by_author(&query.author).await)
}

/// Get core book fields with its metadata block
#[utoipa::path(
    get,
    path = "/books/{id}/metadata",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book metadata", body = BookMetadata),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_metadata(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<BookMetadata>> {
    let metadata = state.services.catalog.get_metadata(id).await?;
    Ok(Json(metadata))
}
