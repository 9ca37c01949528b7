//! `/plans`: list with owning application, create, delete.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::NewPlan;
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
    FieldRules::required("duration", &[(Check::NotEmpty, "Duration is required")]),
    FieldRules::required("price", &[(Check::PositiveFloat, "Price must be a positive number")]),
    FieldRules::optional("note", &[(Check::String, "Note must be a string")]),
    FieldRules::required(
        "applicationId",
        &[(Check::Int, "Application ID is required and must be an integer")],
    ),
];

pub async fn list(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<impl IntoResponse, AppError> {
    let page = query.resolve(&state.pagination);
    let rows = state.store.list_plans(page).await?;
    Ok(listing(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new: NewPlan = RequestValidator::extract(body, CREATE_RULES)?;
    let row = state.store.create_plan(new).await.map_err(|e| match e {
        StoreError::ForeignKeyViolation(_) => AppError::BadRequest("Application not found".into()),
        other => other.into(),
    })?;
    tracing::info!(id = row.id, application_id = row.application_id, "plan created");
    Ok(created("Plan created successfully", row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, "plan")?;
    let row = state.store.delete_plan(id).await?;
    tracing::info!(id, "plan deleted");
    Ok(success("Plan deleted successfully", row))
}
