//! Data models for the library catalog

pub mod book;
pub mod enums;

// Re-export commonly used types
pub use book::{
    AuthorSearch, Book, BookField, BookMetadata, BookPatch, BookQuery, BookResponse, FieldUpdate,
    MetadataBlock, TitleSearch,
};
pub use enums::{BookStatus, Genre};
