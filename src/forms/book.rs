//! Book form fields and validation

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Book;

use super::{collect_errors, one_or_many, sanitize, FieldError};

/// Raw submitted fields for book create/update. Absent text fields arrive
/// as empty strings; the genre selection always normalizes to a sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSubmission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub genre: Vec<String>,
}

/// Trimmed and escaped field set, echoed back verbatim when validation
/// fails so no user input is lost on re-render
#[derive(Debug, Clone, Serialize, Validate)]
pub struct BookFields {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    pub genre: Vec<String>,
}

const FIELD_ORDER: &[&str] = &["title", "author", "summary", "isbn"];

impl BookSubmission {
    /// Trim and escape every free-text field; genre entries are escaped
    /// as submitted (identifiers, order preserved)
    pub fn sanitize(&self) -> BookFields {
        BookFields {
            title: sanitize(&self.title),
            author: sanitize(&self.author),
            summary: sanitize(&self.summary),
            isbn: sanitize(&self.isbn),
            genre: self.genre.iter().map(|g| sanitize(g)).collect(),
        }
    }
}

impl BookFields {
    /// Collect all required-field errors in display order
    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), FIELD_ORDER)
    }

    /// Echo form of a stored record, for pre-populating the update form
    pub fn from_record(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(|g| g.to_string()).collect(),
        }
    }
}
