//! Shared domain enums

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// Book genre classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Fiction,
    NonFiction,
    Science,
    Biography,
    History,
    Technology,
    #[default]
    Other,
}

impl Genre {
    /// Wire name of the genre
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "fiction",
            Genre::NonFiction => "non_fiction",
            Genre::Science => "science",
            Genre::Biography => "biography",
            Genre::History => "history",
            Genre::Technology => "technology",
            Genre::Other => "other",
        }
    }
}

impl FromStr for Genre {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fiction" => Ok(Genre::Fiction),
            "non_fiction" => Ok(Genre::NonFiction),
            "science" => Ok(Genre::Science),
            "biography" => Ok(Genre::Biography),
            "history" => Ok(Genre::History),
            "technology" => Ok(Genre::Technology),
            "other" => Ok(Genre::Other),
            _ => Err(AppError::Validation(format!("genre: unknown genre '{}'", s))),
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Reading status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[default]
    ToRead,
    Reading,
    Finished,
    Paused,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "to_read",
            BookStatus::Reading => "reading",
            BookStatus::Finished => "finished",
            BookStatus::Paused => "paused",
        }
    }
}

impl FromStr for BookStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_read" => Ok(BookStatus::ToRead),
            "reading" => Ok(BookStatus::Reading),
            "finished" => Ok(BookStatus::Finished),
            "paused" => Ok(BookStatus::Paused),
            _ => Err(AppError::Validation(format!("status: unknown status '{}'", s))),
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_names_round_trip() {
        for genre in [
            Genre::Fiction,
            Genre::NonFiction,
            Genre::Science,
            Genre::Biography,
            Genre::History,
            Genre::Technology,
            Genre::Other,
        ] {
            assert_eq!(genre.to_string().parse::<Genre>().ok(), Some(genre));
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(matches!("poetry".parse::<Genre>(), Err(AppError::Validation(_))));
        assert!(matches!("abandoned".parse::<BookStatus>(), Err(AppError::Validation(_))));
        assert!("Fiction".parse::<Genre>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Genre::default(), Genre::Other);
        assert_eq!(BookStatus::default(), BookStatus::ToRead);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&Genre::NonFiction).unwrap(), "\"non_fiction\"");
        assert_eq!(serde_json::to_string(&BookStatus::ToRead).unwrap(), "\"to_read\"");
        let status: BookStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, BookStatus::Paused);
    }
}
