//! SQLite implementation of [`MessageStore`].
//!
//! Uses sqlx with a `chat_turns` table created on startup. Ordering relies
//! on `created_at` with the implicit rowid as tie-break, so turns appended
//! within the same timestamp still come back in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pixchat_core::{ChatRole, ChatTurn};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::store::MessageStore;

/// Persistent message store backed by SQLite.
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TurnRow {
    id: String,
    session_id: String,
    role: String,
    text: Option<String>,
    prompt_text: Option<String>,
    image_ref: Option<String>,
    created_at: DateTime<Utc>,
}

fn role_to_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::System => "system",
    }
}

fn role_from_str(s: &str) -> Result<ChatRole, anyhow::Error> {
    match s {
        "user" => Ok(ChatRole::User),
        "assistant" => Ok(ChatRole::Assistant),
        "system" => Ok(ChatRole::System),
        other => anyhow::bail!("Unknown role in chat_turns: {}", other),
    }
}

impl TryFrom<TurnRow> for ChatTurn {
    type Error = anyhow::Error;

    fn try_from(row: TurnRow) -> Result<Self, Self::Error> {
        Ok(ChatTurn {
            id: Uuid::parse_str(&row.id)?,
            session_id: row.session_id,
            role: role_from_str(&row.role)?,
            text: row.text,
            prompt_text: row.prompt_text,
            image_ref: row.image_ref,
            created_at: row.created_at,
        })
    }
}

impl SqliteMessageStore {
    /// Opens (creating if missing) the database and bootstraps the schema.
    pub async fn new(database_path: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_path);
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating chat_turns table if not exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_turns (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                text TEXT,
                prompt_text TEXT,
                image_ref TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_chat_turns_session_id ON chat_turns(session_id);
            CREATE INDEX IF NOT EXISTS idx_chat_turns_created_at ON chat_turns(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn append(&self, turn: ChatTurn) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO chat_turns (id, session_id, role, text, prompt_text, image_ref, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(turn.id.to_string())
        .bind(&turn.session_id)
        .bind(role_to_str(turn.role))
        .bind(&turn.text)
        .bind(&turn.prompt_text)
        .bind(&turn.image_ref)
        .bind(turn.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, anyhow::Error> {
        let rows: Vec<TurnRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, role, text, prompt_text, image_ref, created_at
            FROM chat_turns
            WHERE session_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ChatTurn::try_from).collect()
    }

    async fn delete_session(&self, session_id: &str) -> Result<u64, anyhow::Error> {
        let result = sqlx::query("DELETE FROM chat_turns WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        info!(
            session_id,
            removed = result.rows_affected(),
            "Deleted session turns"
        );
        Ok(result.rows_affected())
    }
}
