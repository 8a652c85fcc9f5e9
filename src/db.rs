use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

pub type DbPool = Pool<Sqlite>;

/// A stored message with its display-order key.
///
/// `order` is the sort key for display sequence. It is not enforced unique;
/// listing tie-breaks on `id` (insertion order).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub order: i64,
}

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db.max_connections)
        .acquire_timeout(Duration::from_secs(config.db.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the messages table if it does not exist.
///
/// Safe to call against an already-initialized store; runs once during
/// process bootstrap.
pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            "order" INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_messages(pool: &DbPool) -> Result<Vec<Message>, sqlx::Error> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, content, "order"
        FROM messages
        ORDER BY "order" ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Inserts a new message with the next order key.
///
/// The order key is assigned inside the insert itself, so two concurrent
/// creates cannot read the same maximum.
pub async fn create_message(pool: &DbPool, content: &str) -> Result<Message, sqlx::Error> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (content, "order")
        VALUES ($1, (SELECT COALESCE(MAX("order"), 0) + 1 FROM messages))
        RETURNING id, content, "order"
        "#,
    )
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Overwrites the content of an existing message, leaving its order key
/// untouched. Returns `None` if no message has the given id.
pub async fn update_message_content(
    pool: &DbPool,
    message_id: i64,
    content: &str,
) -> Result<Option<Message>, sqlx::Error> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        UPDATE messages
        SET content = $1
        WHERE id = $2
        RETURNING id, content, "order"
        "#,
    )
    .bind(content)
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

/// Removes a message permanently. Returns `false` if no message has the
/// given id. Remaining order keys are not renumbered.
pub async fn delete_message(pool: &DbPool, message_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(message_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Applies a batch of `(id, order)` updates in a single transaction.
///
/// Ids without a matching message are skipped; the transaction commits
/// regardless of how many rows each update touched.
pub async fn reorder_messages(
    pool: &DbPool,
    updates: &[(i64, i64)],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for &(message_id, order) in updates {
        sqlx::query(r#"UPDATE messages SET "order" = $1 WHERE id = $2"#)
            .bind(order)
            .bind(message_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(())
}
