//! Live PostgreSQL fixtures. Each test gets its own schema so tests can run
//! in parallel against one database.

use anyhow::{Context, Result};
use catalog_api::{ensure_schema, PgStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

pub struct TestDb {
    pub pool: PgPool,
    pub store: PgStore,
    schema: String,
}

impl TestDb {
    /// `None` when `DATABASE_URL` is not set.
    pub async fn connect() -> Result<Option<Self>> {
        dotenvy::dotenv().ok();
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping");
            return Ok(None);
        };
        let schema = format!(
            "catalog_test_{}_{}",
            std::process::id(),
            NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed)
        );
        let setup = format!("CREATE SCHEMA IF NOT EXISTS {schema}; SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let setup = setup.clone();
                Box::pin(async move {
                    conn.execute(setup.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .context("failed to connect to DATABASE_URL")?;
        ensure_schema(&pool).await.context("failed to create tables")?;
        let store = PgStore::new(pool.clone());
        Ok(Some(TestDb { pool, store, schema }))
    }

    pub async fn drop_schema(self) -> Result<()> {
        let sql = format!("DROP SCHEMA {} CASCADE", self.schema);
        self.pool.execute(sql.as_str()).await?;
        self.pool.close().await;
        Ok(())
    }
}
