//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::genre::GenreSubmission,
    models::{Book, Genre},
    services::{genres::GenreFormView, DeleteOutcome, SaveOutcome},
    AppState,
};

/// Data bag for the genre list view
#[derive(Serialize)]
pub struct GenreListView {
    pub title: String,
    pub genre_list: Vec<Genre>,
}

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<GenreListView>> {
    let genre_list = state.services.genres.list().await?;
    Ok(Json(GenreListView {
        title: "Genre List".to_string(),
        genre_list,
    }))
}

/// Data bag for the genre detail view: the genre and the books carrying it
#[derive(Serialize)]
pub struct GenreDetailView {
    pub title: String,
    pub genre: Genre,
    pub genre_books: Vec<Book>,
}

pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenreDetailView>> {
    let (genre, genre_books) = state
        .services
        .genres
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(Json(GenreDetailView {
        title: "Genre Detail".to_string(),
        genre,
        genre_books,
    }))
}

pub async fn create_genre_form() -> Json<GenreFormView> {
    Json(GenreFormView {
        title: "Create Genre".to_string(),
        genre: None,
        errors: Vec::new(),
    })
}

pub async fn create_genre(
    State(state): State<AppState>,
    Json(submission): Json<GenreSubmission>,
) -> AppResult<Response> {
    match state.services.genres.create(submission).await? {
        SaveOutcome::Saved(genre) => Ok((StatusCode::CREATED, Json(genre)).into_response()),
        SaveOutcome::Invalid(view) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenreFormView>> {
    let view = state
        .services
        .genres
        .update_form(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(Json(view))
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<GenreSubmission>,
) -> AppResult<Response> {
    match state.services.genres.update(id, submission).await? {
        None => Err(AppError::NotFound("Genre not found".to_string())),
        Some(SaveOutcome::Saved(genre)) => Ok(Json(genre).into_response()),
        Some(SaveOutcome::Invalid(view)) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

/// Data bag rendered when a genre delete is blocked by referencing books
#[derive(Serialize)]
pub struct GenreDeleteView {
    pub title: String,
    pub genre: Genre,
    pub genre_books: Vec<Book>,
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Gone => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        DeleteOutcome::Blocked { entity, dependents } => Ok((
            StatusCode::CONFLICT,
            Json(GenreDeleteView {
                title: "Delete Genre".to_string(),
                genre: entity,
                genre_books: dependents,
            }),
        )
            .into_response()),
    }
}
