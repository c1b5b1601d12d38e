//! Book model, field-level patch dispatch and request/response types.

use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{BookStatus, Genre};
use crate::error::{AppError, AppResult};

/// ISBN-10 or ISBN-13, digits only. An empty string counts as no ISBN.
static ISBN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{10}|[0-9]{13})?$").expect("ISBN pattern is valid"));

/// Date reported in the metadata block of every book
pub const METADATA_LAST_ACCESSED: &str = "2025-09-03";
pub const METADATA_INFO: &str = "Simulación async";

/// A single catalog entry.
///
/// `id` is assigned by the catalog; any value supplied on creation is
/// overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Book {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[serde(default)]
    #[validate(regex(path = *ISBN_REGEX, message = "ISBN debe tener 10 o 13 dígitos numéricos"))]
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Genre,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be a positive number"))]
    pub pages: Option<i32>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Book {
    /// Minimal book with every optional attribute unset
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            isbn: None,
            genre: Genre::default(),
            pages: None,
            publication_year: None,
            status: BookStatus::default(),
            rating: None,
            notes: None,
        }
    }

    /// The three books the catalog starts with
    pub fn samples() -> Vec<Book> {
        vec![
            Book {
                id: Some(1),
                genre: Genre::Fiction,
                pages: Some(863),
                status: BookStatus::Finished,
                ..Book::new("Don Quijote de la Mancha", "Cervantes")
            },
            Book {
                id: Some(2),
                genre: Genre::History,
                pages: Some(498),
                status: BookStatus::Finished,
                ..Book::new("Sapiens", "Yuval Noah Harari")
            },
            Book {
                id: Some(3),
                genre: Genre::Technology,
                pages: Some(464),
                status: BookStatus::Reading,
                ..Book::new("Clean Code", "Robert C. Martin")
            },
        ]
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Id(v) => self.id = v,
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Author(v) => self.author = v,
            FieldUpdate::Isbn(v) => self.isbn = v,
            FieldUpdate::Genre(v) => self.genre = v,
            FieldUpdate::Pages(v) => self.pages = v,
            FieldUpdate::PublicationYear(v) => self.publication_year = v,
            FieldUpdate::Status(v) => self.status = v,
            FieldUpdate::Rating(v) => self.rating = v,
            FieldUpdate::Notes(v) => self.notes = v,
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Attribute names accepted by a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    Author,
    Isbn,
    Genre,
    Pages,
    PublicationYear,
    Status,
    Rating,
    Notes,
}

impl BookField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Isbn => "isbn",
            BookField::Genre => "genre",
            BookField::Pages => "pages",
            BookField::PublicationYear => "publication_year",
            BookField::Status => "status",
            BookField::Rating => "rating",
            BookField::Notes => "notes",
        }
    }

    /// Convert a raw JSON value into a typed update for this field.
    ///
    /// Only the JSON shape is checked; value rules (rating range, ISBN
    /// format, empty titles) are not.
    pub fn update(self, value: Value) -> AppResult<FieldUpdate> {
        Ok(match self {
            BookField::Id => FieldUpdate::Id(self.decode(value)?),
            BookField::Title => FieldUpdate::Title(self.decode(value)?),
            BookField::Author => FieldUpdate::Author(self.decode(value)?),
            BookField::Isbn => FieldUpdate::Isbn(self.decode(value)?),
            BookField::Genre => FieldUpdate::Genre(self.decode_enum(value)?),
            BookField::Pages => FieldUpdate::Pages(self.decode(value)?),
            BookField::PublicationYear => FieldUpdate::PublicationYear(self.decode(value)?),
            BookField::Status => FieldUpdate::Status(self.decode_enum(value)?),
            BookField::Rating => FieldUpdate::Rating(self.decode(value)?),
            BookField::Notes => FieldUpdate::Notes(self.decode(value)?),
        })
    }

    fn decode<T: DeserializeOwned>(self, value: Value) -> AppResult<T> {
        serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("{}: {}", self, e)))
    }

    fn decode_enum<T: FromStr<Err = AppError>>(self, value: Value) -> AppResult<T> {
        let name = value
            .as_str()
            .ok_or_else(|| AppError::BadRequest(format!("{}: expected a string", self)))?;
        name.parse()
            .map_err(|e: AppError| AppError::BadRequest(e.to_string()))
    }
}

impl FromStr for BookField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(BookField::Id),
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "isbn" => Ok(BookField::Isbn),
            "genre" => Ok(BookField::Genre),
            "pages" => Ok(BookField::Pages),
            "publication_year" => Ok(BookField::PublicationYear),
            "status" => Ok(BookField::Status),
            "rating" => Ok(BookField::Rating),
            "notes" => Ok(BookField::Notes),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for BookField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// New value for one book attribute
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Id(Option<i32>),
    Title(String),
    Author(String),
    Isbn(Option<String>),
    Genre(Genre),
    Pages(Option<i32>),
    PublicationYear(Option<i32>),
    Status(BookStatus),
    Rating(Option<i32>),
    Notes(Option<String>),
}

/// Field name to value mapping sent by clients for a partial update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookPatch(#[schema(value_type = Object)] pub IndexMap<String, Value>);

impl BookPatch {
    /// Typed updates for every known field, in request order.
    ///
    /// Unknown names are skipped. Fails without side effects if any known
    /// field carries a value of the wrong shape.
    pub fn into_updates(self) -> AppResult<Vec<FieldUpdate>> {
        self.0
            .into_iter()
            .filter_map(|(name, value)| {
                let field = name.parse::<BookField>().ok();
                if field.is_none() {
                    tracing::debug!("Ignoring unknown book field '{}'", name);
                }
                field.map(|field| field.update(value))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Queries and responses
// ---------------------------------------------------------------------------

/// Book list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    pub genre: Option<Genre>,
    pub status: Option<BookStatus>,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        self.genre.map_or(true, |genre| book.genre == genre)
            && self.status.map_or(true, |status| book.status == status)
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TitleSearch {
    pub title: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AuthorSearch {
    pub author: String,
}

/// Book wrapped with a human readable outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

impl BookResponse {
    pub fn new(message: &str, book: Book) -> Self {
        Self {
            message: message.to_string(),
            book,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetadataBlock {
    pub last_accessed: String,
    pub info: String,
}

/// Core book fields with the static metadata block
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookMetadata {
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub metadata: MetadataBlock,
}

impl From<&Book> for BookMetadata {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            metadata: MetadataBlock {
                last_accessed: METADATA_LAST_ACCESSED.to_string(),
                info: METADATA_INFO.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_isbn(isbn: &str) -> Book {
        Book {
            isbn: Some(isbn.to_string()),
            ..Book::new("Title", "Author")
        }
    }

    fn with_rating(rating: i32) -> Book {
        Book {
            rating: Some(rating),
            ..Book::new("Title", "Author")
        }
    }

    #[test]
    fn test_isbn_rules() {
        assert!(with_isbn("1234567890").validate().is_ok());
        assert!(with_isbn("9780132350884").validate().is_ok());
        assert!(with_isbn("12345").validate().is_err());
        assert!(with_isbn("12345678901234").validate().is_err());
        assert!(with_isbn("12345abcde").validate().is_err());
        assert!(with_isbn("123456789X").validate().is_err());
        assert!(Book::new("Title", "Author").validate().is_ok());
    }

    #[test]
    fn test_empty_isbn_counts_as_absent() {
        assert!(with_isbn("").validate().is_ok());
        assert!(with_isbn(" ").validate().is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(with_rating(0).validate().is_err());
        assert!(with_rating(6).validate().is_err());
        assert!(with_rating(1).validate().is_ok());
        assert!(with_rating(5).validate().is_ok());
    }

    #[test]
    fn test_required_text_fields() {
        assert!(Book::new("", "Author").validate().is_err());
        assert!(Book::new("Title", "").validate().is_err());
    }

    #[test]
    fn test_pages_must_be_positive() {
        let book = Book {
            pages: Some(0),
            ..Book::new("Title", "Author")
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_validation_error_names_field() {
        let err: AppError = Book::new("", "Author").validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("title")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let book: Book = serde_json::from_value(json!({"title": "Dune", "author": "Herbert"})).unwrap();
        assert_eq!(book.id, None);
        assert_eq!(book.genre, Genre::Other);
        assert_eq!(book.status, BookStatus::ToRead);
        assert_eq!(book.rating, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_genre() {
        let result: Result<Book, _> =
            serde_json::from_value(json!({"title": "Dune", "author": "Herbert", "genre": "poetry"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_skips_unknown_fields() {
        let patch: BookPatch =
            serde_json::from_value(json!({"rating": 4, "colour": "blue", "status": "paused"})).unwrap();
        let updates = patch.into_updates().unwrap();
        assert_eq!(
            updates,
            vec![FieldUpdate::Rating(Some(4)), FieldUpdate::Status(BookStatus::Paused)]
        );
    }

    #[test]
    fn test_patch_does_not_check_value_rules() {
        let patch: BookPatch =
            serde_json::from_value(json!({"rating": 99, "title": "", "isbn": "abc"})).unwrap();
        let mut book = Book::new("Title", "Author");
        for update in patch.into_updates().unwrap() {
            book.apply(update);
        }
        assert_eq!(book.rating, Some(99));
        assert_eq!(book.title, "");
        assert_eq!(book.isbn.as_deref(), Some("abc"));
    }

    #[test]
    fn test_patch_rejects_wrong_shapes() {
        let patch: BookPatch = serde_json::from_value(json!({"pages": "many"})).unwrap();
        match patch.into_updates() {
            Err(AppError::BadRequest(msg)) => assert!(msg.starts_with("pages: ")),
            other => panic!("unexpected result {:?}", other),
        }

        let patch: BookPatch = serde_json::from_value(json!({"genre": "poetry"})).unwrap();
        assert!(matches!(patch.into_updates(), Err(AppError::BadRequest(_))));

        let patch: BookPatch = serde_json::from_value(json!({"title": null})).unwrap();
        assert!(matches!(patch.into_updates(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let patch: BookPatch = serde_json::from_value(json!({"notes": null})).unwrap();
        assert_eq!(patch.into_updates().unwrap(), vec![FieldUpdate::Notes(None)]);
    }

    #[test]
    fn test_query_matches_all_filters() {
        let samples = Book::samples();
        let query = BookQuery {
            genre: Some(Genre::History),
            status: Some(BookStatus::Finished),
        };
        let matched: Vec<_> = samples.iter().filter(|b| query.matches(b)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Sapiens");
        assert!(samples.iter().all(|b| BookQuery::default().matches(b)));
    }

    #[test]
    fn test_metadata_block_is_static() {
        let metadata = BookMetadata::from(&Book::samples()[0]);
        assert_eq!(metadata.id, Some(1));
        assert_eq!(metadata.metadata.last_accessed, METADATA_LAST_ACCESSED);
        assert_eq!(metadata.metadata.info, METADATA_INFO);
    }
}
