//! `/users`: list, signup, delete. Password hashes never leave the store.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::{NewUser, UserSignup};
use crate::pagination::PageQuery;
use crate::response::{created, listing, success};
use crate::service::{hash_password, Check, FieldRules, RequestValidator};
use crate::state::AppState;
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

const MIN_PASSWORD_LENGTH: usize = 6;

const CREATE_RULES: &[FieldRules] = &[
    FieldRules::required("name", &[(Check::NotEmpty, "Name is required")]),
    FieldRules::required("email", &[(Check::Email, "Invalid email")]),
    FieldRules::required(
        "password",
        &[(Check::MinLength(MIN_PASSWORD_LENGTH), "Password must be at least 6 characters")],
    ),
];

pub async fn list(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<impl IntoResponse, AppError> {
    let page = query.resolve(&state.pagination);
    let rows = state.store.list_users(page).await?;
    Ok(listing(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let signup: UserSignup = RequestValidator::extract(body, CREATE_RULES)?;
    let password_hash = hash_password(signup.password).await?;
    let new = NewUser {
        name: signup.name,
        email: signup.email,
        password_hash,
    };
    let row = state.store.create_user(new).await.map_err(|e| match e {
        StoreError::UniqueViolation(_) => AppError::BadRequest("Email already exists".into()),
        other => other.into(),
    })?;
    tracing::info!(id = row.id, "user created");
    Ok(created("User created successfully", row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, "user")?;
    let row = state.store.delete_user(id).await?;
    tracing::info!(id, "user deleted");
    Ok(success("User deleted successfully", row))
}
