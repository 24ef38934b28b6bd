//! Author service

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{
        author::{AuthorFields, AuthorSubmission},
        FieldError,
    },
    models::{Author, Book},
    repository::CatalogStore,
};

use super::{DeleteOutcome, SaveOutcome};

/// Data bag for the author create/update form
#[derive(Debug, Serialize)]
pub struct AuthorFormView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorFields>,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    /// Author paired with every book they wrote, read independently
    pub async fn detail(&self, id: Uuid) -> AppResult<Option<(Author, Vec<Book>)>> {
        let (author, books) =
            tokio::try_join!(self.store.get_author(id), self.store.books_by_author(id))?;
        Ok(author.map(|a| (a, books)))
    }

    pub async fn create(
        &self,
        submission: AuthorSubmission,
    ) -> AppResult<SaveOutcome<Author, AuthorFormView>> {
        let fields = submission.sanitize();
        let validation = fields.validate_fields();
        if !validation.errors.is_empty() {
            return Ok(SaveOutcome::Invalid(AuthorFormView {
                title: "Create Author".to_string(),
                author: Some(fields),
                errors: validation.errors,
            }));
        }
        let author = Author {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            family_name: fields.family_name,
            date_of_birth: validation.date_of_birth,
            date_of_death: validation.date_of_death,
        };
        self.store.save_author(&author).await?;
        tracing::info!("Created author {} ({})", author.id, author.display_name());
        Ok(SaveOutcome::Saved(author))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Option<AuthorFormView>> {
        let author = match self.store.get_author(id).await? {
            None => return Ok(None),
            Some(a) => a,
        };
        Ok(Some(AuthorFormView {
            title: "Update Author".to_string(),
            author: Some(AuthorFields::from_record(&author)),
            errors: Vec::new(),
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        submission: AuthorSubmission,
    ) -> AppResult<Option<SaveOutcome<Author, AuthorFormView>>> {
        if self.store.get_author(id).await?.is_none() {
            return Ok(None);
        }
        let fields = submission.sanitize();
        let validation = fields.validate_fields();
        if !validation.errors.is_empty() {
            return Ok(Some(SaveOutcome::Invalid(AuthorFormView {
                title: "Update Author".to_string(),
                author: Some(fields),
                errors: validation.errors,
            })));
        }
        let author = Author {
            id,
            first_name: fields.first_name,
            family_name: fields.family_name,
            date_of_birth: validation.date_of_birth,
            date_of_death: validation.date_of_death,
        };
        self.store.save_author(&author).await?;
        Ok(Some(SaveOutcome::Saved(author)))
    }

    /// Deletion guard: an author still referenced by books is kept
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, dependents) =
            tokio::try_join!(self.store.get_author(id), self.store.books_by_author(id))?;
        let author = match author {
            None => return Ok(DeleteOutcome::Gone),
            Some(a) => a,
        };
        if !dependents.is_empty() {
            return Ok(DeleteOutcome::Blocked {
                entity: author,
                dependents,
            });
        }
        self.store.delete_author(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
