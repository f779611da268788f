pub mod conversation_repository;
pub mod message_repository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;

/// Opens the connection pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(AppError::DatabaseConnectionFailed)?
        .create_if_missing(true)
        // Required for ON DELETE CASCADE on chat_messages.
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(AppError::DatabaseConnectionFailed)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::MigrationFailed)?;

    info!("Database connection established and migrations applied");
    Ok(pool)
}

/// In-memory database for tests. A single connection, since each SQLite
/// memory connection is its own database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_create_schema() {
        let pool = test_pool().await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('conversations', 'chat_messages') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("Failed to list tables");

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["chat_messages", "conversations"]);
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let pool = test_pool().await;

        let result: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("Failed to check foreign_keys pragma");

        assert_eq!(result.0, 1, "Foreign keys should be enabled");
    }

    #[tokio::test]
    async fn orphan_message_rejected_by_schema() {
        let pool = test_pool().await;

        let result = sqlx::query(
            "INSERT INTO chat_messages (conversation_id, content, gmt_create, gmt_modified)
             VALUES (?, ?, ?, ?)",
        )
        .bind(42_i64)
        .bind("orphan")
        .bind(chrono::Utc::now())
        .bind(chrono::Utc::now())
        .execute(&pool)
        .await;

        assert!(result.is_err(), "Insert without a parent conversation should fail");
    }
}
