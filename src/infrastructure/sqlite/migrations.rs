use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS stocks (
            symbol TEXT PRIMARY KEY,
            likes INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stock_likes (
            symbol TEXT NOT NULL REFERENCES stocks(symbol),
            identity TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (symbol, identity)
        );

        CREATE INDEX IF NOT EXISTS idx_stock_likes_symbol ON stock_likes(symbol);
        "
    ).map_err(|e| DomainError::StoreUnavailable(format!("Migration failed: {e}")))
}
