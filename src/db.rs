use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db, config })
    }
}

/// Idempotent schema bootstrap: creates both tables and the composite
/// index, as no-ops when they already exist. Safe to run on every start.
pub async fn init_schema(db: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(50) UNIQUE NOT NULL,
            email VARCHAR(255) UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            last_login TIMESTAMPTZ
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shoes (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            colorway TEXT NOT NULL,
            size DOUBLE PRECISION NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            image TEXT,
            condition TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    // Backs the grouped/browse queries; not a uniqueness constraint.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS shoes_user_brand_model_idx
        ON shoes (user_id, brand, model)
        "#,
    )
    .execute(db)
    .await?;

    tracing::debug!("schema ready");
    Ok(())
}
