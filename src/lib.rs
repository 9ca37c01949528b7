//! Catalog API: CRUD endpoints for applications, plans, posts and users over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::{Config, PaginationConfig};
pub use error::{AppError, ConfigError, FieldError};
pub use routes::{common_routes, resource_routes};
pub use state::AppState;
pub use store::{ensure_schema, PgStore, Store, StoreError};

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full HTTP surface with request tracing and a body size cap.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
