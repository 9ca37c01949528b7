//! `/posts`: list, create, partial update, delete.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::{NewPost, PostChanges};
use crate::pagination::PageQuery;
use crate::response::{created, listing, success};
use crate::service::{Check, FieldRules, RequestValidator};
use crate::state::AppState;
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

const CREATE_RULES: &[FieldRules] = &[
    FieldRules::required("title", &[(Check::NotEmpty, "Title is required")]),
    FieldRules::required("content", &[(Check::NotEmpty, "Content is required")]),
    FieldRules::required("authorId", &[(Check::Int, "Author ID must be an integer")]),
];

const UPDATE_RULES: &[FieldRules] = &[
    FieldRules::optional("title", &[(Check::NotEmpty, "Title cannot be empty")]),
    FieldRules::optional("content", &[(Check::NotEmpty, "Content cannot be empty")]),
    FieldRules::optional("published", &[(Check::Boolean, "Published must be a boolean")]),
];

pub async fn list(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<impl IntoResponse, AppError> {
    let page = query.resolve(&state.pagination);
    let rows = state.store.list_posts(page).await?;
    Ok(listing(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new: NewPost = RequestValidator::extract(body, CREATE_RULES)?;
    let row = state.store.create_post(new).await.map_err(|e| match e {
        StoreError::ForeignKeyViolation(_) => AppError::BadRequest("Author not found".into()),
        other => other.into(),
    })?;
    tracing::info!(id = row.id, author_id = row.author_id, "post created");
    Ok(created("Post created successfully", row))
}

/// The body rejection is held until the id has been checked, so a bad id
/// wins over a missing or malformed payload.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, "post")?;
    let JsonObject(body) = body?;
    let changes: PostChanges = RequestValidator::extract(body, UPDATE_RULES)?;
    let row = state
        .store
        .update_post(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;
    tracing::info!(id, "post updated");
    Ok(success("Post updated successfully", row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, "post")?;
    let row = state.store.delete_post(id).await?;
    tracing::info!(id, "post deleted");
    Ok(success("Post deleted successfully", row))
}
