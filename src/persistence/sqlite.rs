use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, params};

use super::{ScoreRecord, ScoreStore};
use crate::error::StoreError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS results (
    username TEXT PRIMARY KEY NOT NULL,
    score    INTEGER NOT NULL DEFAULT 0,
    count    INTEGER NOT NULL DEFAULT 0
);";

/// SQLite-backed leaderboard, one row per player name
pub struct SqliteScoreStore {
    conn: Mutex<Connection>,
}

impl SqliteScoreStore {
    /// Open (or create) the database file and its table
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Open(format!("{}: {e}", path.display())))?;
        let store = Self::init(conn)?;
        log::info!("Opened score store at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Open(format!("schema setup failed: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn to_u32(column: &'static str, value: i64) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::OutOfRange { column, value })
}

impl ScoreStore for SqliteScoreStore {
    fn upsert(&self, name: &str, score_delta: u32, count_delta: u32) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO results (username, score, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(username) DO UPDATE SET
                score = score + excluded.score,
                count = count + excluded.count",
            params![name, score_delta as i64, count_delta as i64],
        )?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt =
            conn.prepare("SELECT username, score, count FROM results ORDER BY score DESC, username ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (name, score, count) = row?;
            records.push(ScoreRecord {
                name,
                score: to_u32("score", score)?,
                count: to_u32("count", count)?,
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (SqliteScoreStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteScoreStore::open(&dir.path().join("scores.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_upsert_creates_then_accumulates() {
        let (store, _dir) = test_store();
        store.upsert("Ann", 40, 3).unwrap();
        store.upsert("Ann", 100, 1).unwrap();

        let rows = store.list_all().unwrap();
        assert_eq!(rows, vec![ScoreRecord::new("Ann", 140, 4)]);
    }

    #[test]
    fn test_list_sorted_by_score_descending() {
        let (store, _dir) = test_store();
        store.upsert("low", 10, 1).unwrap();
        store.upsert("high", 300, 9).unwrap();
        store.upsert("mid", 120, 4).unwrap();
        store.upsert("also-mid", 120, 2).unwrap();

        let names: Vec<String> = store.list_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["high", "also-mid", "mid", "low"]);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.db");
        SqliteScoreStore::open(&path).unwrap().upsert("Ann", 10, 1).unwrap();

        let reopened = SqliteScoreStore::open(&path).unwrap();
        assert_eq!(reopened.list_all().unwrap(), vec![ScoreRecord::new("Ann", 10, 1)]);
    }

    #[test]
    fn test_open_in_directory_that_does_not_exist_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("scores.db");
        assert!(matches!(SqliteScoreStore::open(&path), Err(StoreError::Open(_))));
    }

    #[test]
    fn test_in_memory_store_starts_empty() {
        let store = SqliteScoreStore::open_in_memory().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }
}
