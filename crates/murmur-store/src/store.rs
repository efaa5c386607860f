use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use murmur_schema::{ChatRole, ConsentStatus, ConversationTurn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;

use crate::migrations::run_migrations;
use crate::StoreError;

/// SQLite-backed persistence for conversation history, consent records,
/// and user/guild bookkeeping. One connection, shared behind a mutex;
/// every query runs on the blocking pool.
#[derive(Clone)]
pub struct ChatStore {
    db: Arc<Mutex<Connection>>,
}

impl ChatStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        run_migrations(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn db(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.db)
    }

    /// Appends one turn with a store-assigned timestamp.
    pub async fn append_turn(
        &self,
        user_id: &str,
        role: ChatRole,
        message: &str,
    ) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let message = message.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            let at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
            conn.execute(
                r#"
                INSERT INTO conversation_history (user_id, role, message, timestamp)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![user_id, role.as_str(), message, at],
            )?;
            Ok::<(), StoreError>(())
        })
        .await??;

        Ok(())
    }

    /// The most recent `limit` turns for a user, oldest first. The fetch
    /// is newest-first and reversed so callers always see chronological
    /// order; the autoincrement id breaks timestamp ties.
    pub async fn try_recent_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            let mut stmt = conn.prepare(
                r#"
                SELECT user_id, role, message, timestamp
                FROM conversation_history
                WHERE user_id = ?1
                ORDER BY timestamp DESC, id DESC
                LIMIT ?2
                "#,
            )?;
            let rows = stmt.query_map(params![user_id, limit as i64], row_to_turn)?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            turns.reverse();
            Ok::<Vec<ConversationTurn>, StoreError>(turns)
        })
        .await?
    }

    /// Infallible read-back used by the chat flow: a failed read is
    /// logged and degrades to an empty history, indistinguishable to the
    /// caller from a user with no rows.
    pub async fn recent_history(&self, user_id: &str, limit: usize) -> Vec<ConversationTurn> {
        match self.try_recent_history(user_id, limit).await {
            Ok(turns) => turns,
            Err(err) => {
                tracing::error!(user_id, "failed to read conversation history: {err}");
                Vec::new()
            }
        }
    }

    /// Deletes every turn for the user. Returns the number of rows
    /// removed; purging a user with no rows is a no-op success.
    pub async fn purge_history(&self, user_id: &str) -> Result<usize, StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            let deleted = conn.execute(
                "DELETE FROM conversation_history WHERE user_id = ?1",
                params![user_id],
            )?;
            Ok::<usize, StoreError>(deleted)
        })
        .await?
    }

    pub async fn consent_status(
        &self,
        user_id: &str,
    ) -> Result<Option<ConsentStatus>, StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            let raw: Option<String> = conn
                .query_row(
                    "SELECT status FROM users WHERE user_id = ?1",
                    params![user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok::<Option<ConsentStatus>, StoreError>(
                raw.as_deref().and_then(ConsentStatus::parse),
            )
        })
        .await?
    }

    /// Gating helper: absent record, declined record, and read failure
    /// all block identically (the failure is logged).
    pub async fn is_agreed(&self, user_id: &str) -> bool {
        match self.consent_status(user_id).await {
            Ok(Some(status)) => status.allows_commands(),
            Ok(None) => false,
            Err(err) => {
                tracing::error!(user_id, "failed to read consent record: {err}");
                false
            }
        }
    }

    /// Upserts the consent record; the latest answer wins.
    pub async fn set_consent(
        &self,
        user_id: &str,
        username: &str,
        status: ConsentStatus,
    ) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let username = username.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            conn.execute(
                r#"
                INSERT INTO users (user_id, username, status)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(user_id) DO UPDATE SET
                    username = excluded.username,
                    status = excluded.status
                "#,
                params![user_id, username, status.as_str()],
            )?;
            Ok::<(), StoreError>(())
        })
        .await??;

        Ok(())
    }

    /// Records that a user agreed to the terms inside a guild. Write-only
    /// bookkeeping; nothing in the bot reads it back.
    pub async fn record_guild(&self, user_id: &str, guild_id: &str) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let guild_id = guild_id.to_owned();
        task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| StoreError::Lock)?;
            conn.execute(
                "INSERT OR IGNORE INTO user_guilds (user_id, guild_id) VALUES (?1, ?2)",
                params![user_id, guild_id],
            )?;
            Ok::<(), StoreError>(())
        })
        .await??;

        Ok(())
    }
}

fn row_to_turn(row: &Row<'_>) -> rusqlite::Result<ConversationTurn> {
    let role_raw: String = row.get(1)?;
    let at_raw: String = row.get(3)?;
    Ok(ConversationTurn {
        user_id: row.get(0)?,
        role: ChatRole::parse(&role_raw).unwrap_or(ChatRole::User),
        message: row.get(2)?,
        at: parse_datetime_sql(&at_raw)?,
    })
}

fn parse_datetime_sql(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}
