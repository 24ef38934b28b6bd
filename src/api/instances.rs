//! Book instance endpoints

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
    forms::instance::InstanceSubmission,
    models::BookInstanceRow,
    services::{instances::InstanceFormView, DeleteOutcome, SaveOutcome},
    AppState,
};

/// Data bag for the instance list view
#[derive(Serialize)]
pub struct InstanceListView {
    pub title: String,
    pub bookinstance_list: Vec<BookInstanceRow>,
}

pub async fn list_instances(State(state): State<AppState>) -> AppResult<Json<InstanceListView>> {
    let bookinstance_list = state.services.instances.list().await?;
    Ok(Json(InstanceListView {
        title: "Book Instance List".to_string(),
        bookinstance_list,
    }))
}

/// Data bag for the instance detail view
#[derive(Serialize)]
pub struct InstanceDetailView {
    pub title: String,
    pub bookinstance: BookInstanceRow,
}

pub async fn instance_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InstanceDetailView>> {
    let bookinstance = state
        .services
        .instances
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
    Ok(Json(InstanceDetailView {
        title: format!("Copy: {}", bookinstance.book.title),
        bookinstance,
    }))
}

pub async fn create_instance_form(
    State(state): State<AppState>,
) -> AppResult<Json<InstanceFormView>> {
    Ok(Json(state.services.instances.create_form().await?))
}

pub async fn create_instance(
    State(state): State<AppState>,
    Json(submission): Json<InstanceSubmission>,
) -> AppResult<Response> {
    match state.services.instances.create(submission).await? {
        SaveOutcome::Saved(instance) => {
            Ok((StatusCode::CREATED, Json(instance)).into_response())
        }
        SaveOutcome::Invalid(view) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

pub async fn update_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InstanceFormView>> {
    let view = state
        .services
        .instances
        .update_form(id)
        .await?
        .ok_or_else(|| AppError::NotFound("BookInstance not found".to_string()))?;
    Ok(Json(view))
}

pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<InstanceSubmission>,
) -> AppResult<Response> {
    match state.services.instances.update(id, submission).await? {
        None => Err(AppError::NotFound("BookInstance not found".to_string())),
        Some(SaveOutcome::Saved(instance)) => Ok(Json(instance).into_response()),
        Some(SaveOutcome::Invalid(view)) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

/// Instance deletes are never blocked, so the response is 204 for both
/// the deleted and the already-absent case
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.instances.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Gone => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        DeleteOutcome::Blocked { .. } => Ok(StatusCode::CONFLICT.into_response()),
    }
}
