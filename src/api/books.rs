//! Book endpoints

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
    forms::book::BookSubmission,
    models::{Book, BookDetail, BookInstance, BookListRow},
    services::{books::BookFormView, DeleteOutcome, SaveOutcome},
    AppState,
};

/// Data bag for the book list view
#[derive(Serialize)]
pub struct BookListView {
    pub title: String,
    pub book_list: Vec<BookListRow>,
}

pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookListView>> {
    let book_list = state.services.books.list().await?;
    Ok(Json(BookListView {
        title: "Book List".to_string(),
        book_list,
    }))
}

/// Data bag for the book detail view
#[derive(Serialize)]
pub struct BookDetailView {
    pub title: String,
    pub book: BookDetail,
}

pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookDetailView>> {
    let book = state
        .services
        .books
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
    Ok(Json(BookDetailView {
        title: book.title.clone(),
        book,
    }))
}

pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Json<BookFormView>> {
    Ok(Json(state.services.books.create_form().await?))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(submission): Json<BookSubmission>,
) -> AppResult<Response> {
    match state.services.books.create(submission).await? {
        SaveOutcome::Saved(book) => Ok((StatusCode::CREATED, Json(book)).into_response()),
        SaveOutcome::Invalid(view) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookFormView>> {
    let view = state
        .services
        .books
        .update_form(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
    Ok(Json(view))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<BookSubmission>,
) -> AppResult<Response> {
    match state.services.books.update(id, submission).await? {
        None => Err(AppError::NotFound("Book not found".to_string())),
        Some(SaveOutcome::Saved(book)) => Ok(Json(book).into_response()),
        Some(SaveOutcome::Invalid(view)) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

/// Data bag rendered when a book delete is blocked by surviving instances
#[derive(Serialize)]
pub struct BookDeleteView {
    pub title: String,
    pub book: Book,
    pub bookinstances: Vec<BookInstance>,
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.books.delete(id).await? {
        // "Already absent" is the target state, not an error
        DeleteOutcome::Deleted | DeleteOutcome::Gone => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        DeleteOutcome::Blocked { entity, dependents } => Ok((
            StatusCode::CONFLICT,
            Json(BookDeleteView {
                title: "Delete Book".to_string(),
                book: entity,
                bookinstances: dependents,
            }),
        )
            .into_response()),
    }
}
