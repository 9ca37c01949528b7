//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

/// 201 with `{message, data}`. Only creation answers 201.
pub fn created<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope { message, data }))
}

/// 200 with `{message, data}` for updates and deletes.
pub fn success<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { message, data }))
}

/// Listings are a bare array, never wrapped.
pub fn listing<T: Serialize>(rows: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(rows))
}
