//! Resource routes: `/applications`, `/plans`, `/posts`, `/users`.

use crate::handlers::{applications, plans, posts, users};
use crate::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/applications", get(applications::list).post(applications::create))
        .route("/applications/:id", delete(applications::delete))
        .route("/plans", get(plans::list).post(plans::create))
        .route("/plans/:id", delete(plans::delete))
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/:id", delete(posts::delete).put(posts::update))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", delete(users::delete))
        .with_state(state)
}
