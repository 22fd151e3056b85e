//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for reviews and per-user preference records.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            brewery_id TEXT NOT NULL,
            rating INTEGER NOT NULL,
            description TEXT NOT NULL,
            review_month TEXT NOT NULL,
            reviewer_name TEXT NOT NULL,
            reviewer_color TEXT NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0,
            dislikes INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS preferences (
            username TEXT PRIMARY KEY,
            reviewed_brewery_ids TEXT NOT NULL DEFAULT '[]',
            liked_review_ids TEXT NOT NULL DEFAULT '[]',
            disliked_review_ids TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reviews_brewery_id ON reviews(brewery_id);
        CREATE INDEX IF NOT EXISTS idx_reviews_reviewer_name ON reviews(reviewer_name);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_one_per_reviewer
            ON reviews(brewery_id, reviewer_name);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
