//! Repository layer holding the in-memory book collection

pub mod books;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Book;

/// Owner of the ordered book collection.
///
/// Clones share the same collection; the lock only serializes access to it.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `books`, kept in the given order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }
}
