//! Genre service

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{
        genre::{GenreFields, GenreSubmission},
        FieldError,
    },
    models::{Book, Genre},
    repository::CatalogStore,
};

use super::{DeleteOutcome, SaveOutcome};

/// Data bag for the genre create/update form
#[derive(Debug, Serialize)]
pub struct GenreFormView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreFields>,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.list_genres().await
    }

    /// Genre paired with every book carrying it
    pub async fn detail(&self, id: Uuid) -> AppResult<Option<(Genre, Vec<Book>)>> {
        let (genre, books) =
            tokio::try_join!(self.store.get_genre(id), self.store.books_by_genre(id))?;
        Ok(genre.map(|g| (g, books)))
    }

    pub async fn create(
        &self,
        submission: GenreSubmission,
    ) -> AppResult<SaveOutcome<Genre, GenreFormView>> {
        let fields = submission.sanitize();
        let errors = fields.field_errors();
        if !errors.is_empty() {
            return Ok(SaveOutcome::Invalid(GenreFormView {
                title: "Create Genre".to_string(),
                genre: Some(fields),
                errors,
            }));
        }
        let genre = Genre {
            id: Uuid::new_v4(),
            name: fields.name,
        };
        self.store.save_genre(&genre).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(SaveOutcome::Saved(genre))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Option<GenreFormView>> {
        let genre = match self.store.get_genre(id).await? {
            None => return Ok(None),
            Some(g) => g,
        };
        Ok(Some(GenreFormView {
            title: "Update Genre".to_string(),
            genre: Some(GenreFields::from_record(&genre)),
            errors: Vec::new(),
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        submission: GenreSubmission,
    ) -> AppResult<Option<SaveOutcome<Genre, GenreFormView>>> {
        if self.store.get_genre(id).await?.is_none() {
            return Ok(None);
        }
        let fields = submission.sanitize();
        let errors = fields.field_errors();
        if !errors.is_empty() {
            return Ok(Some(SaveOutcome::Invalid(GenreFormView {
                title: "Update Genre".to_string(),
                genre: Some(fields),
                errors,
            })));
        }
        let genre = Genre {
            id,
            name: fields.name,
        };
        self.store.save_genre(&genre).await?;
        Ok(Some(SaveOutcome::Saved(genre)))
    }

    /// Deletion guard: a genre still referenced by books is kept
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, dependents) =
            tokio::try_join!(self.store.get_genre(id), self.store.books_by_genre(id))?;
        let genre = match genre {
            None => return Ok(DeleteOutcome::Gone),
            Some(g) => g,
        };
        if !dependents.is_empty() {
            return Ok(DeleteOutcome::Blocked {
                entity: genre,
                dependents,
            });
        }
        self.store.delete_genre(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
