use rusqlite::Connection;

/// Creates the schema when it does not exist yet. Safe to run on every
/// startup.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS conversation_history (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id   TEXT NOT NULL,
            role      TEXT NOT NULL CHECK (role IN ('user', 'bot')),
            message   TEXT NOT NULL,
            timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_conversation_history_user
            ON conversation_history (user_id, timestamp);

        CREATE TABLE IF NOT EXISTS users (
            user_id  TEXT PRIMARY KEY,
            username TEXT,
            status   TEXT NOT NULL CHECK (status IN ('agreed', 'declined'))
        );

        CREATE TABLE IF NOT EXISTS user_guilds (
            user_id  TEXT NOT NULL,
            guild_id TEXT NOT NULL,
            PRIMARY KEY (user_id, guild_id)
        );
        "#,
    )
}
