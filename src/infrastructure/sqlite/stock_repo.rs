use crate::domain::entities::stock_record::StockRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::values::identity::IdentityToken;
use crate::domain::values::symbol::Symbol;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::debug;

pub struct SqliteStockRepo {
    conn: Mutex<Connection>,
}

impl SqliteStockRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn parse_time(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }

    fn load(conn: &Connection, symbol: &Symbol) -> Result<Option<StockRecord>, DomainError> {
        let row = conn
            .query_row(
                "SELECT symbol, likes, created_at, updated_at FROM stocks WHERE symbol = ?1",
                params![symbol.as_str()],
                |row| {
                    let likes: i64 = row.get(1)?;
                    let created_str: String = row.get(2)?;
                    let updated_str: String = row.get(3)?;
                    Ok((row.get::<_, String>(0)?, likes, created_str, updated_str))
                },
            )
            .optional()
            .map_err(|e| DomainError::StoreUnavailable(format!("Failed to load {symbol}: {e}")))?;

        let Some((stored_symbol, likes, created_str, updated_str)) = row else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(
                "SELECT identity FROM stock_likes WHERE symbol = ?1 ORDER BY created_at, rowid",
            )
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
        let likers = stmt
            .query_map(params![symbol.as_str()], |row| {
                row.get::<_, String>(0).map(IdentityToken::from_raw)
            })
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(Some(StockRecord {
            symbol: stored_symbol,
            likes: likes.max(0) as u64,
            likers,
            created_at: Self::parse_time(&created_str),
            updated_at: Self::parse_time(&updated_str),
        }))
    }

    fn insert_if_absent(conn: &Connection, symbol: &Symbol) -> Result<(), DomainError> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR IGNORE INTO stocks (symbol, likes, created_at, updated_at) VALUES (?1, 0, ?2, ?2)",
            params![symbol.as_str(), now],
        )
        .map_err(|e| DomainError::StoreUnavailable(format!("Failed to create {symbol}: {e}")))?;
        Ok(())
    }
}

impl StockRepository for SqliteStockRepo {
    fn find_or_create(&self, symbol: &Symbol) -> Result<StockRecord, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
        Self::insert_if_absent(&conn, symbol)?;
        Self::load(&conn, symbol)?
            .ok_or_else(|| DomainError::StoreUnavailable(format!("Record for {symbol} vanished")))
    }

    fn record_like(
        &self,
        symbol: &Symbol,
        identity: &IdentityToken,
    ) -> Result<StockRecord, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
        let tx = conn.transaction()?;
        Self::insert_if_absent(&tx, symbol)?;

        let now = Utc::now().to_rfc3339();
        let inserted = tx
            .execute(
                "INSERT OR IGNORE INTO stock_likes (symbol, identity, created_at) VALUES (?1, ?2, ?3)",
                params![symbol.as_str(), identity.as_str(), now],
            )
            .map_err(|e| DomainError::StoreUnavailable(format!("Failed to like {symbol}: {e}")))?;

        if inserted > 0 {
            tx.execute(
                "UPDATE stocks
                 SET likes = (SELECT COUNT(*) FROM stock_likes WHERE symbol = ?1), updated_at = ?2
                 WHERE symbol = ?1",
                params![symbol.as_str(), now],
            )
            .map_err(|e| DomainError::StoreUnavailable(format!("Failed to count likes: {e}")))?;
            debug!(%symbol, "like recorded");
        } else {
            debug!(%symbol, "duplicate like ignored");
        }

        let record = Self::load(&tx, symbol)?
            .ok_or_else(|| DomainError::StoreUnavailable(format!("Record for {symbol} vanished")))?;
        tx.commit()?;
        Ok(record)
    }

    fn get(&self, symbol: &Symbol) -> Result<Option<StockRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
        Self::load(&conn, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::migrations::run_migrations;

    fn repo() -> SqliteStockRepo {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        SqliteStockRepo::new(conn)
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn test_find_or_create_starts_at_zero() {
        let repo = repo();
        let record = repo.find_or_create(&sym("goog")).unwrap();
        assert_eq!(record.symbol, "GOOG");
        assert_eq!(record.likes, 0);
        assert!(repo.get(&sym("GOOG")).unwrap().is_some());
    }

    #[test]
    fn test_get_does_not_create() {
        let repo = repo();
        assert!(repo.get(&sym("TSLA")).unwrap().is_none());
        assert!(repo.get(&sym("TSLA")).unwrap().is_none());
    }

    #[test]
    fn test_record_like_is_idempotent() {
        let repo = repo();
        let me = IdentityToken::from_raw("me");
        let first = repo.record_like(&sym("MSFT"), &me).unwrap();
        let second = repo.record_like(&sym("MSFT"), &me).unwrap();
        assert_eq!(first.likes, 1);
        assert_eq!(second.likes, 1);
        assert_eq!(second.likers, vec![me]);
    }

    #[test]
    fn test_distinct_identities_accumulate() {
        let repo = repo();
        repo.record_like(&sym("AAPL"), &IdentityToken::from_raw("a")).unwrap();
        let record = repo
            .record_like(&sym("AAPL"), &IdentityToken::from_raw("b"))
            .unwrap();
        assert_eq!(record.likes, 2);
        assert_eq!(record.likes as usize, record.likers.len());
    }

    #[test]
    fn test_likes_are_per_symbol() {
        let repo = repo();
        let me = IdentityToken::from_raw("me");
        repo.record_like(&sym("AAPL"), &me).unwrap();
        let other = repo.record_like(&sym("GOOG"), &me).unwrap();
        assert_eq!(other.likes, 1);
        assert_eq!(repo.find_or_create(&sym("AAPL")).unwrap().likes, 1);
    }
}
