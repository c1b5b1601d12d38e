//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookMetadata, BookPatch, BookQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and append a book.
    ///
    /// The id is the number of stored books plus one. Ids are never reused
    /// or compacted, so after a delete the new id may equal an existing one.
    pub async fn insert(&self, book: Book) -> AppResult<Book> {
        if let Err(e) = book.validate() {
            tracing::warn!("Catalog insert rejected: {}", e);
            return Err(e.into());
        }

        let created = self.repository.books_insert(book).await;
        tracing::info!(
            "Catalog insert: created book id={} \"{}\"",
            created.id.unwrap_or_default(),
            created.title
        );
        Ok(created)
    }

    /// List books, optionally filtered by genre and/or status
    pub async fn list(&self, query: &BookQuery) -> Vec<Book> {
        self.repository.books_list(query).await
    }

    /// Get a book by id
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books_get(id)
            .await
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Replace a book wholesale, keeping its id and position
    pub async fn replace(&self, id: i32, mut book: Book) -> AppResult<Book> {
        // Existence is checked before validation
        self.get(id).await?;

        if let Err(e) = book.validate() {
            tracing::warn!("Catalog replace of id={} rejected: {}", id, e);
            return Err(e.into());
        }

        book.id = Some(id);
        let updated = self
            .repository
            .books_replace(id, book)
            .await
            .ok_or_else(|| AppError::book_not_found(id))?;
        tracing::info!("Catalog replace: updated book id={}", id);
        Ok(updated)
    }

    /// Overwrite individual fields of a book.
    ///
    /// Unknown field names are ignored. Field values are not validated.
    pub async fn patch_fields(&self, id: i32, patch: BookPatch) -> AppResult<Book> {
        self.get(id).await?;

        let updates = patch.into_updates()?;
        let count = updates.len();
        let updated = self
            .repository
            .books_apply(id, updates)
            .await
            .ok_or_else(|| AppError::book_not_found(id))?;
        tracing::info!("Catalog patch: {} field(s) written on book id={}", count, id);
        Ok(updated)
    }

    /// Remove a book and return it
    pub async fn delete(&self, id: i32) -> AppResult<Book> {
        let removed = self
            .repository
            .books_remove(id)
            .await
            .ok_or_else(|| AppError::book_not_found(id))?;
        tracing::info!("Catalog delete: removed book id={}", id);
        Ok(removed)
    }

    pub async fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.repository.books_search_title(title).await
    }

    pub async fn search_by_author(&self, author: &str) -> Vec<Book> {
        self.repository.books_search_author(author).await
    }

    /// Core fields of a book together with its metadata block
    pub async fn get_metadata(&self, id: i32) -> AppResult<BookMetadata> {
        let book = self.get(id).await?;
        Ok(BookMetadata::from(&book))
    }
}
