//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::author::AuthorSubmission,
    models::{Author, Book},
    services::{authors::AuthorFormView, DeleteOutcome, SaveOutcome},
    AppState,
};

/// Author record plus its derived display projections
#[derive(Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            name: author.display_name(),
            lifespan: author.lifespan(),
            url: author.url(),
        }
    }
}

/// Data bag for the author list view
#[derive(Serialize)]
pub struct AuthorListView {
    pub title: String,
    pub author_list: Vec<AuthorView>,
}

pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<AuthorListView>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(AuthorListView {
        title: "Author List".to_string(),
        author_list: authors.iter().map(AuthorView::from).collect(),
    }))
}

/// Data bag for the author detail view: the author and their books
#[derive(Serialize)]
pub struct AuthorDetailView {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<Book>,
}

pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AuthorDetailView>> {
    let (author, author_books) = state
        .services
        .authors
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    Ok(Json(AuthorDetailView {
        title: "Author Detail".to_string(),
        author: AuthorView::from(&author),
        author_books,
    }))
}

pub async fn create_author_form() -> Json<AuthorFormView> {
    Json(AuthorFormView {
        title: "Create Author".to_string(),
        author: None,
        errors: Vec::new(),
    })
}

pub async fn create_author(
    State(state): State<AppState>,
    Json(submission): Json<AuthorSubmission>,
) -> AppResult<Response> {
    match state.services.authors.create(submission).await? {
        SaveOutcome::Saved(author) => {
            Ok((StatusCode::CREATED, Json(AuthorView::from(&author))).into_response())
        }
        SaveOutcome::Invalid(view) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AuthorFormView>> {
    let view = state
        .services
        .authors
        .update_form(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    Ok(Json(view))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<AuthorSubmission>,
) -> AppResult<Response> {
    match state.services.authors.update(id, submission).await? {
        None => Err(AppError::NotFound("Author not found".to_string())),
        Some(SaveOutcome::Saved(author)) => Ok(Json(AuthorView::from(&author)).into_response()),
        Some(SaveOutcome::Invalid(view)) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

/// Data bag rendered when an author delete is blocked by their books
#[derive(Serialize)]
pub struct AuthorDeleteView {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<Book>,
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Gone => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        DeleteOutcome::Blocked { entity, dependents } => Ok((
            StatusCode::CONFLICT,
            Json(AuthorDeleteView {
                title: "Delete Author".to_string(),
                author: AuthorView::from(&entity),
                author_books: dependents,
            }),
        )
            .into_response()),
    }
}
