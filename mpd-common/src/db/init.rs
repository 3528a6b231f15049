//! Database initialization

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

use crate::Result;

/// Open (or create) the database file and initialize the schema
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// In-memory database with the schema initialized
///
/// Single connection that never expires: each SQLite in-memory connection
/// would otherwise see its own empty database.
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parameter_sets (
            id TEXT PRIMARY KEY,
            emerging_trends TEXT NOT NULL,
            timeframe TEXT NOT NULL,
            personas TEXT NOT NULL,
            num_competitors INTEGER NOT NULL CHECK (num_competitors >= 1),
            custom_parameters TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artifacts (
            id TEXT PRIMARY KEY,
            parameter_id TEXT NOT NULL REFERENCES parameter_sets(id),
            kind TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (parameter_id, kind)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (parameter_sets, artifacts)");

    Ok(())
}
