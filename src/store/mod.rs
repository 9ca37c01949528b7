//! Data access. Handlers only see the [`Store`] trait; [`PgStore`] is the
//! PostgreSQL implementation.

mod postgres;
mod schema;

pub use postgres::PgStore;
pub use schema::ensure_schema;

use crate::models::{
    Application, NewApplication, NewPlan, NewPost, NewUser, Plan, PlanListing, Post, PostChanges, PostSummary, User,
};
use crate::pagination::Page;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or_default().to_string();
            if db.is_unique_violation() {
                return StoreError::UniqueViolation(constraint);
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint);
            }
        }
        StoreError::Database(e)
    }
}

/// Every operation is atomic on its own. `delete_application` is the only
/// operation touching two tables and runs them in one transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_applications(&self, page: Page) -> Result<Vec<Application>, StoreError>;
    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError>;
    /// Deletes the application's plans, then the application.
    async fn delete_application(&self, id: i32) -> Result<Application, StoreError>;

    async fn list_plans(&self, page: Page) -> Result<Vec<PlanListing>, StoreError>;
    async fn create_plan(&self, new: NewPlan) -> Result<Plan, StoreError>;
    async fn delete_plan(&self, id: i32) -> Result<Plan, StoreError>;

    async fn list_posts(&self, page: Page) -> Result<Vec<PostSummary>, StoreError>;
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError>;
    /// `Ok(None)` when no post has this id.
    async fn update_post(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError>;
    async fn delete_post(&self, id: i32) -> Result<Post, StoreError>;

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError>;
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn delete_user(&self, id: i32) -> Result<User, StoreError>;
}
