//! Books storage operations.
//!
//! Pure storage: callers are responsible for validation.
//! Lookups match the first book carrying the id, in insertion order.

use super::Repository;
use crate::models::{Book, BookQuery, FieldUpdate};

impl Repository {
    /// Append `book` with id set to the current count plus one
    pub async fn books_insert(&self, mut book: Book) -> Book {
        let mut books = self.books.write().await;
        book.id = Some(books.len() as i32 + 1);
        books.push(book.clone());
        book
    }

    /// Books matching every filter of `query`, in insertion order
    pub async fn books_list(&self, query: &BookQuery) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect()
    }

    pub async fn books_get(&self, id: i32) -> Option<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == Some(id))
            .cloned()
    }

    /// Swap the book with the given id for `book`, keeping its position
    pub async fn books_replace(&self, id: i32, book: Book) -> Option<Book> {
        let mut books = self.books.write().await;
        let slot = books.iter_mut().find(|b| b.id == Some(id))?;
        *slot = book.clone();
        Some(book)
    }

    /// Apply field updates to the book with the given id
    pub async fn books_apply(&self, id: i32, updates: Vec<FieldUpdate>) -> Option<Book> {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|b| b.id == Some(id))?;
        for update in updates {
            book.apply(update);
        }
        Some(book.clone())
    }

    /// Remove the book with the given id. Remaining ids are left untouched.
    pub async fn books_remove(&self, id: i32) -> Option<Book> {
        let mut books = self.books.write().await;
        let position = books.iter().position(|b| b.id == Some(id))?;
        Some(books.remove(position))
    }

    /// Case-insensitive substring search on titles
    pub async fn books_search_title(&self, needle: &str) -> Vec<Book> {
        self.books_search(needle, |book| book.title.as_str()).await
    }

    /// Case-insensitive substring search on authors
    pub async fn books_search_author(&self, needle: &str) -> Vec<Book> {
        self.books_search(needle, |book| book.author.as_str()).await
    }

    async fn books_search<F>(&self, needle: &str, field: F) -> Vec<Book>
    where
        F: Fn(&Book) -> &str,
    {
        let needle = needle.to_lowercase();
        self.books
            .read()
            .await
            .iter()
            .filter(|book| field(book).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookStatus, Genre};

    fn ids(books: &[Book]) -> Vec<Option<i32>> {
        books.iter().map(|b| b.id).collect()
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_genre() {
        let repository = Repository::with_books(Book::samples());

        let finished = repository
            .books_list(&BookQuery {
                status: Some(BookStatus::Finished),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&finished), vec![Some(1), Some(2)]);

        let technology = repository
            .books_list(&BookQuery {
                genre: Some(Genre::Technology),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&technology), vec![Some(3)]);

        let none = repository
            .books_list(&BookQuery {
                genre: Some(Genre::Technology),
                status: Some(BookStatus::Finished),
            })
            .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_insert_numbers_by_count() {
        let repository = Repository::new();
        let first = repository.books_insert(Book::new("Dune", "Frank Herbert")).await;
        let second = repository.books_insert(Book::new("Emma", "Jane Austen")).await;
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let repository = Repository::with_books(Book::samples());
        let replacement = Book {
            id: Some(2),
            ..Book::new("Homo Deus", "Yuval Noah Harari")
        };

        assert!(repository.books_replace(2, replacement).await.is_some());
        let all = repository.books_list(&BookQuery::default()).await;
        assert_eq!(all[1].title, "Homo Deus");
        assert_eq!(ids(&all), vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repository = Repository::with_books(Book::samples());
        assert!(repository.books_get(9).await.is_none());
        assert!(repository.books_replace(9, Book::new("t", "a")).await.is_none());
        assert!(repository.books_apply(9, vec![]).await.is_none());
        assert!(repository.books_remove(9).await.is_none());
        assert_eq!(repository.books_list(&BookQuery::default()).await.len(), 3);
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let repository = Repository::with_books(Book::samples());
        assert_eq!(ids(&repository.books_search_title("CLEAN").await), vec![Some(3)]);
        assert_eq!(ids(&repository.books_search_author("harari").await), vec![Some(2)]);
        assert_eq!(repository.books_search_title("").await.len(), 3);
        assert!(repository.books_search_author("tolkien").await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_does_not_renumber() {
        let repository = Repository::with_books(Book::samples());
        let removed = repository.books_remove(1).await;
        assert_eq!(removed.map(|b| b.title), Some("Don Quijote de la Mancha".to_string()));
        assert_eq!(ids(&repository.books_list(&BookQuery::default()).await), vec![Some(2), Some(3)]);
    }
}
