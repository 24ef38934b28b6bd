//! Book catalog service: list/detail expansion, form handling, guarded delete

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::{
        book::{BookFields, BookSubmission},
        mark_checked, CheckedGenre, FieldError,
    },
    models::{Author, AuthorRef, Book, BookDetail, BookInstance, BookListRow},
    repository::CatalogStore,
};

use super::{DeleteOutcome, SaveOutcome};

/// Data bag for the book create/update form. On validation failure it
/// carries the escaped submission and the genre catalog with checkbox
/// state reconciled against the submitted selection.
#[derive(Debug, Serialize)]
pub struct BookFormView {
    pub title: String,
    pub authors: Vec<AuthorRef>,
    pub genres: Vec<CheckedGenre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookFields>,
    pub errors: Vec<FieldError>,
}

struct ValidatedBook {
    author: Uuid,
    genre: Vec<Uuid>,
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Book list rows: title with the author reference expanded inline.
    /// Genres stay unexpanded to keep the list read cheap.
    pub async fn list(&self) -> AppResult<Vec<BookListRow>> {
        let (books, authors) =
            tokio::try_join!(self.store.list_books(), self.store.list_authors())?;
        let by_id: HashMap<Uuid, &Author> = authors.iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let author = by_id
                    .get(&book.author)
                    .map(|a| AuthorRef::from(*a))
                    .unwrap_or(AuthorRef {
                        id: book.author,
                        name: "(unknown)".to_string(),
                    });
                BookListRow {
                    id: book.id,
                    title: book.title,
                    author,
                }
            })
            .collect())
    }

    /// Fully expanded detail: author and genres resolved, paired with the
    /// book's instances fetched independently. `None` when the book does
    /// not exist; a dangling author reference is a hard failure.
    pub async fn detail(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let (book, instances) =
            tokio::try_join!(self.store.get_book(id), self.store.instances_by_book(id))?;
        let book = match book {
            None => return Ok(None),
            Some(b) => b,
        };

        let author = self.store.get_author(book.author).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "book {} references missing author {}",
                book.id, book.author
            ))
        })?;

        // Genres resolve in stored (submission) order. A reference left
        // dangling by the delete race is skipped rather than failing the
        // whole page.
        let mut genres = Vec::with_capacity(book.genre.len());
        for genre_id in &book.genre {
            if let Some(genre) = self.store.get_genre(*genre_id).await? {
                genres.push(genre);
            }
        }

        Ok(Some(BookDetail {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            genres,
            instances,
        }))
    }

    /// Side data for a fresh create form: all authors and genres
    pub async fn create_form(&self) -> AppResult<BookFormView> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(BookFormView {
            title: "Create Book".to_string(),
            authors: authors.iter().map(AuthorRef::from).collect(),
            genres: mark_checked(genres, &[]),
            book: None,
            errors: Vec::new(),
        })
    }

    pub async fn create(
        &self,
        submission: BookSubmission,
    ) -> AppResult<SaveOutcome<Book, BookFormView>> {
        let fields = submission.sanitize();
        match self.validate(&fields).await? {
            Ok(valid) => {
                let book = Book {
                    id: Uuid::new_v4(),
                    title: fields.title,
                    author: valid.author,
                    summary: fields.summary,
                    isbn: fields.isbn,
                    genre: valid.genre,
                };
                self.store.save_book(&book).await?;
                tracing::info!("Created book {} ({})", book.id, book.title);
                Ok(SaveOutcome::Saved(book))
            }
            Err(errors) => Ok(SaveOutcome::Invalid(
                self.invalid_view("Create Book", fields, errors).await?,
            )),
        }
    }

    /// Pre-populated update form, with stored genre selections checked
    pub async fn update_form(&self, id: Uuid) -> AppResult<Option<BookFormView>> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.get_book(id),
            self.store.list_authors(),
            self.store.list_genres()
        )?;
        let book = match book {
            None => return Ok(None),
            Some(b) => b,
        };
        let fields = BookFields::from_record(&book);
        Ok(Some(BookFormView {
            title: "Update Book".to_string(),
            authors: authors.iter().map(AuthorRef::from).collect(),
            genres: mark_checked(genres, &fields.genre),
            book: Some(fields),
            errors: Vec::new(),
        }))
    }

    /// `None` when the book does not exist (update surfaces not-found
    /// distinctly, unlike create)
    pub async fn update(
        &self,
        id: Uuid,
        submission: BookSubmission,
    ) -> AppResult<Option<SaveOutcome<Book, BookFormView>>> {
        if self.store.get_book(id).await?.is_none() {
            return Ok(None);
        }
        let fields = submission.sanitize();
        match self.validate(&fields).await? {
            Ok(valid) => {
                let book = Book {
                    id,
                    title: fields.title,
                    author: valid.author,
                    summary: fields.summary,
                    isbn: fields.isbn,
                    genre: valid.genre,
                };
                self.store.save_book(&book).await?;
                Ok(Some(SaveOutcome::Saved(book)))
            }
            Err(errors) => Ok(Some(SaveOutcome::Invalid(
                self.invalid_view("Update Book", fields, errors).await?,
            ))),
        }
    }

    /// Deletion guard: a book with surviving instances is never deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, dependents) =
            tokio::try_join!(self.store.get_book(id), self.store.instances_by_book(id))?;
        let book = match book {
            None => return Ok(DeleteOutcome::Gone),
            Some(b) => b,
        };
        if !dependents.is_empty() {
            return Ok(DeleteOutcome::Blocked {
                entity: book,
                dependents,
            });
        }
        self.store.delete_book(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(DeleteOutcome::Deleted)
    }

    /// Required-field errors plus write-time referential checks: the
    /// author and every selected genre must resolve to existing records.
    async fn validate(
        &self,
        fields: &BookFields,
    ) -> AppResult<Result<ValidatedBook, Vec<FieldError>>> {
        let mut errors = fields.field_errors();

        let mut author_id = None;
        if !fields.author.is_empty() {
            match fields.author.parse::<Uuid>() {
                Ok(id) => match self.store.get_author(id).await? {
                    Some(_) => author_id = Some(id),
                    None => errors.push(FieldError::new("author", "Author not found.")),
                },
                Err(_) => errors.push(FieldError::new("author", "Author not found.")),
            }
        }

        let mut genre_ids = Vec::with_capacity(fields.genre.len());
        for raw in &fields.genre {
            match raw.parse::<Uuid>() {
                Ok(id) => match self.store.get_genre(id).await? {
                    Some(_) => genre_ids.push(id),
                    None => errors.push(FieldError::new("genre", "Genre not found.")),
                },
                Err(_) => errors.push(FieldError::new("genre", "Genre not found.")),
            }
        }

        if !errors.is_empty() {
            return Ok(Err(errors));
        }
        // An empty author field was already collected as a required-field
        // error, so a resolved id must exist here.
        let author = author_id
            .ok_or_else(|| AppError::Internal("author id missing after validation".to_string()))?;
        Ok(Ok(ValidatedBook {
            author,
            genre: genre_ids,
        }))
    }

    /// Rebuild the form view after a rejected submission: escaped values
    /// echoed back, catalog re-fetched, submitted genres re-checked
    async fn invalid_view(
        &self,
        title: &str,
        fields: BookFields,
        errors: Vec<FieldError>,
    ) -> AppResult<BookFormView> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(BookFormView {
            title: title.to_string(),
            authors: authors.iter().map(AuthorRef::from).collect(),
            genres: mark_checked(genres, &fields.genre),
            book: Some(fields),
            errors,
        })
    }
}
