//! Book model and expansion shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::author::{Author, AuthorRef};
use super::book_instance::BookInstance;
use super::genre::Genre;

/// Full book model from database. `author` and `genre` hold reference
/// identifiers; expansion is an explicit, separate read (see services).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    /// Genre references in submission order (display order only)
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Inline book expansion carried by instance rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRef {
    pub id: Uuid,
    pub title: String,
}

impl From<&Book> for BookRef {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}

/// Short book representation for lists: title plus expanded author,
/// genres deliberately left unexpanded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListRow {
    pub id: Uuid,
    pub title: String,
    pub author: AuthorRef,
}

/// Fully expanded detail view: author and genre records resolved, paired
/// with every instance of this book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}
