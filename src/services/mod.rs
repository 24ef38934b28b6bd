//! Business logic services

pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;
pub mod stats;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Result of a guarded delete attempt.
///
/// The dependent check and the delete are not one transaction; a
/// dependent created in between is an accepted race at this layer.
#[derive(Debug)]
pub enum DeleteOutcome<T, D> {
    /// Target already absent; the desired state holds, so this is a
    /// successful no-op rather than an error
    Gone,
    /// Dependents still reference the target; nothing was mutated
    Blocked { entity: T, dependents: Vec<D> },
    Deleted,
}

/// Result of a form-driven create or update
#[derive(Debug)]
pub enum SaveOutcome<T, F> {
    Saved(T),
    /// Validation failed; carries the reconciled form view for re-render
    Invalid(F),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub instances: instances::InstancesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services sharing the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            instances: instances::InstancesService::new(store.clone()),
            stats: stats::StatsService::new(store),
        }
    }
}
