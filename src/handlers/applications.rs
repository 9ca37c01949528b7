//! `/applications`: list, create, cascading delete.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::NewApplication;
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
    FieldRules::required("name", &[(Check::NotEmpty, "Name is required")]),
    FieldRules::optional("description", &[(Check::String, "Description must be a string")]),
];

pub async fn list(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<impl IntoResponse, AppError> {
    let page = query.resolve(&state.pagination);
    let rows = state.store.list_applications(page).await?;
    Ok(listing(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new: NewApplication = RequestValidator::extract(body, CREATE_RULES)?;
    let row = state.store.create_application(new).await.map_err(|e| match e {
        StoreError::UniqueViolation(_) => AppError::BadRequest("Application name already exists".into()),
        other => other.into(),
    })?;
    tracing::info!(id = row.id, name = %row.name, "application created");
    Ok(created("Application created successfully", row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, "application")?;
    let row = state.store.delete_application(id).await?;
    tracing::info!(id, "application deleted with its plans");
    Ok(success("Application and related Plans deleted successfully", row))
}
