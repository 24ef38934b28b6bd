//! Book instance service: copy tracking, form handling, deletes

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::{
        instance::{InstanceFields, InstanceSubmission},
        FieldError,
    },
    models::{Book, BookInstance, BookInstanceRow, BookRef, InstanceStatus, STATUS_OPTIONS},
    repository::CatalogStore,
};

use super::{DeleteOutcome, SaveOutcome};

/// Data bag for the instance create/update form. The book list backs the
/// selection dropdown and is re-fetched even when re-rendering after a
/// failed update.
#[derive(Debug, Serialize)]
pub struct InstanceFormView {
    pub title: String,
    pub book_list: Vec<BookRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_book: Option<String>,
    pub status_list: Vec<InstanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookinstance: Option<InstanceFields>,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct InstancesService {
    store: Arc<dyn CatalogStore>,
}

impl InstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Instance list with each row's book reference expanded
    pub async fn list(&self) -> AppResult<Vec<BookInstanceRow>> {
        let (instances, books) =
            tokio::try_join!(self.store.list_instances(), self.store.list_books())?;
        let by_id: HashMap<Uuid, &Book> = books.iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .iter()
            .map(|instance| BookInstanceRow::new(instance, Self::book_ref(&by_id, instance.book)))
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Option<BookInstanceRow>> {
        let instance = match self.store.get_instance(id).await? {
            None => return Ok(None),
            Some(i) => i,
        };
        let book = self
            .store
            .get_book(instance.book)
            .await?
            .map(|b| BookRef::from(&b))
            .unwrap_or(BookRef {
                id: instance.book,
                title: "(unknown)".to_string(),
            });
        Ok(Some(BookInstanceRow::new(&instance, book)))
    }

    pub async fn create_form(&self) -> AppResult<InstanceFormView> {
        let books = self.store.list_books().await?;
        Ok(Self::form_view("Create BookInstance", books, None, Vec::new()))
    }

    pub async fn create(
        &self,
        submission: InstanceSubmission,
    ) -> AppResult<SaveOutcome<BookInstance, InstanceFormView>> {
        let fields = submission.sanitize();
        let mut validation = fields.validate_fields();
        let book = self.resolve_book(&fields, &mut validation.errors).await?;

        if !validation.errors.is_empty() {
            return Ok(SaveOutcome::Invalid(
                self.invalid_view("Create BookInstance", fields, validation.errors)
                    .await?,
            ));
        }

        let book = book
            .ok_or_else(|| AppError::Internal("book id missing after validation".to_string()))?;
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book,
            imprint: fields.imprint,
            status: validation.status,
            // Absent due date defaults to the creation day
            due_back: validation
                .due_back
                .unwrap_or_else(|| Utc::now().date_naive()),
        };
        self.store.save_instance(&instance).await?;
        tracing::info!("Created book instance {} for book {}", instance.id, book);
        Ok(SaveOutcome::Saved(instance))
    }

    /// Pre-populated update form paired with the full book list
    pub async fn update_form(&self, id: Uuid) -> AppResult<Option<InstanceFormView>> {
        let (instance, books) =
            tokio::try_join!(self.store.get_instance(id), self.store.list_books())?;
        let instance = match instance {
            None => return Ok(None),
            Some(i) => i,
        };
        let fields = InstanceFields::from_record(&instance);
        Ok(Some(Self::form_view(
            "Update BookInstance",
            books,
            Some(fields),
            Vec::new(),
        )))
    }

    pub async fn update(
        &self,
        id: Uuid,
        submission: InstanceSubmission,
    ) -> AppResult<Option<SaveOutcome<BookInstance, InstanceFormView>>> {
        let existing = match self.store.get_instance(id).await? {
            None => return Ok(None),
            Some(i) => i,
        };
        let fields = submission.sanitize();
        let mut validation = fields.validate_fields();
        let book = self.resolve_book(&fields, &mut validation.errors).await?;

        if !validation.errors.is_empty() {
            return Ok(Some(SaveOutcome::Invalid(
                self.invalid_view("Update BookInstance", fields, validation.errors)
                    .await?,
            )));
        }

        let book = book
            .ok_or_else(|| AppError::Internal("book id missing after validation".to_string()))?;
        let instance = BookInstance {
            id,
            book,
            imprint: fields.imprint,
            status: validation.status,
            // An absent date on update keeps the stored one; the
            // creation-time default never reapplies.
            due_back: validation.due_back.unwrap_or(existing.due_back),
        };
        self.store.save_instance(&instance).await?;
        Ok(Some(SaveOutcome::Saved(instance)))
    }

    /// Instances have no dependents, so deletes are never blocked
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstance, BookInstance>> {
        if self.store.get_instance(id).await?.is_none() {
            return Ok(DeleteOutcome::Gone);
        }
        self.store.delete_instance(id).await?;
        tracing::info!("Deleted book instance {}", id);
        Ok(DeleteOutcome::Deleted)
    }

    fn book_ref(by_id: &HashMap<Uuid, &Book>, id: Uuid) -> BookRef {
        by_id
            .get(&id)
            .map(|b| BookRef::from(*b))
            .unwrap_or(BookRef {
                id,
                title: "(unknown)".to_string(),
            })
    }

    fn form_view(
        title: &str,
        books: Vec<Book>,
        fields: Option<InstanceFields>,
        errors: Vec<FieldError>,
    ) -> InstanceFormView {
        let selected_book = fields
            .as_ref()
            .map(|f| f.book.clone())
            .filter(|b| !b.is_empty());
        InstanceFormView {
            title: title.to_string(),
            book_list: books.iter().map(BookRef::from).collect(),
            selected_book,
            status_list: STATUS_OPTIONS.to_vec(),
            bookinstance: fields,
            errors,
        }
    }

    /// Write-time referential check for the book reference. An empty
    /// field is already a required-field error; only malformed or
    /// unresolved identifiers are added here.
    async fn resolve_book(
        &self,
        fields: &InstanceFields,
        errors: &mut Vec<FieldError>,
    ) -> AppResult<Option<Uuid>> {
        if fields.book.is_empty() {
            return Ok(None);
        }
        match fields.book.parse::<Uuid>() {
            Ok(id) => {
                if self.store.get_book(id).await?.is_some() {
                    Ok(Some(id))
                } else {
                    errors.push(FieldError::new("book", "Book not found."));
                    Ok(None)
                }
            }
            Err(_) => {
                errors.push(FieldError::new("book", "Book not found."));
                Ok(None)
            }
        }
    }

    /// Re-render view after a rejected submission; the book list is
    /// re-fetched so the dropdown is never silently empty
    async fn invalid_view(
        &self,
        title: &str,
        fields: InstanceFields,
        errors: Vec<FieldError>,
    ) -> AppResult<InstanceFormView> {
        let books = self.store.list_books().await?;
        Ok(Self::form_view(title, books, Some(fields), errors))
    }
}
