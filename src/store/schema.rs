//! Table DDL. Idempotent, safe to run on every start.

use super::StoreError;
use sqlx::PgPool;

/// Creation order follows foreign keys: parents before children.
const TABLES: &[(&str, &str)] = &[
    (
        "applications",
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            CONSTRAINT applications_name_key UNIQUE (name)
        )
        "#,
    ),
    (
        "plans",
        r#"
        CREATE TABLE IF NOT EXISTS plans (
            id SERIAL PRIMARY KEY,
            duration TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            note TEXT,
            application_id INTEGER NOT NULL,
            CONSTRAINT plans_price_positive CHECK (price > 0),
            CONSTRAINT plans_application_id_fkey FOREIGN KEY (application_id) REFERENCES applications (id)
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            CONSTRAINT users_email_key UNIQUE (email)
        )
        "#,
    ),
    (
        "posts",
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            published BOOLEAN NOT NULL DEFAULT FALSE,
            author_id INTEGER NOT NULL,
            CONSTRAINT posts_author_id_fkey FOREIGN KEY (author_id) REFERENCES users (id)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS plans_application_id_idx ON plans (application_id)",
    "CREATE INDEX IF NOT EXISTS posts_author_id_idx ON posts (author_id)",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
