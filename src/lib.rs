//! Carrel Lending Library Catalog Server
//!
//! Tracks books, authors, genres and physical book copies, exposing
//! create/read/update/delete workflows with write-time referential
//! checks, guarded deletes and form-state reconciliation.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
