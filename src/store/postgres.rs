//! PostgreSQL store over a shared `PgPool`.

use super::{Store, StoreError};
use crate::models::{
    Application, ApplicationRef, NewApplication, NewPlan, NewPost, NewUser, Plan, PlanListing, Post, PostChanges,
    PostSummary, User,
};
use crate::pagination::Page;
use async_trait::async_trait;
use sqlx::PgPool;

const PLAN_COLUMNS: &str = "id, duration, price, note, application_id";
const POST_COLUMNS: &str = "id, title, content, published, author_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlanListingRow {
    id: i32,
    duration: String,
    price: f64,
    note: Option<String>,
    application_id: i32,
    application_name: String,
}

impl From<PlanListingRow> for PlanListing {
    fn from(r: PlanListingRow) -> Self {
        PlanListing {
            id: r.id,
            duration: r.duration,
            price: r.price,
            note: r.note,
            application: ApplicationRef {
                id: r.application_id,
                name: r.application_name,
            },
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_applications(&self, page: Page) -> Result<Vec<Application>, StoreError> {
        tracing::debug!(skip = page.skip, take = page.take, "list applications");
        let rows = sqlx::query_as::<_, Application>(
            "SELECT id, name, description FROM applications ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.take)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError> {
        tracing::debug!(name = %new.name, "insert application");
        let row = sqlx::query_as::<_, Application>(
            "INSERT INTO applications (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(new.name)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_application(&self, id: i32) -> Result<Application, StoreError> {
        let mut tx = self.pool.begin().await?;
        let plans = sqlx::query("DELETE FROM plans WHERE application_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let row = sqlx::query_as::<_, Application>(
            "DELETE FROM applications WHERE id = $1 RETURNING id, name, description",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        // Dropping `tx` without commit rolls the plan deletion back.
        let row = row.ok_or(StoreError::NotFound)?;
        tx.commit().await?;
        tracing::debug!(id, plans, "deleted application with its plans");
        Ok(row)
    }

    async fn list_plans(&self, page: Page) -> Result<Vec<PlanListing>, StoreError> {
        tracing::debug!(skip = page.skip, take = page.take, "list plans");
        let rows = sqlx::query_as::<_, PlanListingRow>(
            r#"
            SELECT p.id, p.duration, p.price, p.note,
                   a.id AS application_id, a.name AS application_name
            FROM plans p
            JOIN applications a ON a.id = p.application_id
            ORDER BY p.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.take)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PlanListing::from).collect())
    }

    async fn create_plan(&self, new: NewPlan) -> Result<Plan, StoreError> {
        tracing::debug!(application_id = new.application_id, "insert plan");
        let sql = format!(
            "INSERT INTO plans (duration, price, note, application_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            PLAN_COLUMNS
        );
        let row = sqlx::query_as::<_, Plan>(&sql)
            .bind(new.duration)
            .bind(new.price)
            .bind(new.note)
            .bind(new.application_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_plan(&self, id: i32) -> Result<Plan, StoreError> {
        let sql = format!("DELETE FROM plans WHERE id = $1 RETURNING {}", PLAN_COLUMNS);
        sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn list_posts(&self, page: Page) -> Result<Vec<PostSummary>, StoreError> {
        tracing::debug!(skip = page.skip, take = page.take, "list posts");
        let rows = sqlx::query_as::<_, PostSummary>(
            "SELECT id, title, content, published FROM posts ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.take)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        tracing::debug!(author_id = new.author_id, "insert post");
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(new.title)
            .bind(new.content)
            .bind(new.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_post(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        tracing::debug!(id, ?changes, "update post");
        // NULL parameters keep the current column value.
        let sql = format!(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                published = COALESCE($4, published)
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .bind(changes.published)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_post(&self, id: i32) -> Result<Post, StoreError> {
        let sql = format!("DELETE FROM posts WHERE id = $1 RETURNING {}", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        tracing::debug!(skip = page.skip, take = page.take, "list users");
        let rows = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.take)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        tracing::debug!(email = %new.email, "insert user");
        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id, name, email",
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_user(&self, id: i32) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 RETURNING id, name, email")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }
}
