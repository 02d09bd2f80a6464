//! SQLite progress store.
//!
//! Durable store with separate reader/writer connections so every method
//! takes `&self` and the store is `Send + Sync`. Timestamps are persisted as
//! RFC 3339 text (sub-millisecond precision), numeric fields as SQLite REAL
//! and INTEGER columns, the mistake log as a JSON array column.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::progress::{Mistake, ProgressEntry};

use super::{migrations, ProgressRepository, Result, StoreError};

/// SQLite-backed progress store.
pub struct SqliteProgressStore {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl SqliteProgressStore {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Open (or create) a store at `db_path`, or at the platform data
    /// directory when `None`.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("app", "rote", "core").ok_or_else(|| {
                    StoreError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                data_dir.join("rote.db")
            }
        };

        let writer_conn = Connection::open(&path)?;
        Self::configure_connection(&writer_conn)?;

        // Migrations run on the writer only
        migrations::apply_migrations(&writer_conn)?;

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
        })
    }

    /// Parse RFC3339 timestamp
    fn parse_timestamp(value: &str, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid {} timestamp '{}': {}", field_name, value, e),
                    )),
                )
            })
    }

    /// Convert a row to ProgressEntry
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<ProgressEntry> {
        let mistakes_json: String = row.get("mistakes")?;
        let mistakes: Vec<Mistake> = serde_json::from_str(&mistakes_json).unwrap_or_default();

        let last_reviewed: String = row.get("last_reviewed")?;
        let next_review: String = row.get("next_review")?;

        Ok(ProgressEntry {
            item_key: row.get("item_key")?,
            strength: row.get("strength")?,
            last_reviewed: Self::parse_timestamp(&last_reviewed, "last_reviewed")?,
            next_review: Self::parse_timestamp(&next_review, "next_review")?,
            total_reviews: row.get("total_reviews")?,
            consecutive_correct: row.get("consecutive_correct")?,
            efactor: row.get("efactor")?,
            interval: row.get("interval_days")?,
            mistakes,
        })
    }
}

impl ProgressRepository for SqliteProgressStore {
    fn get(&self, item_key: &str) -> Result<Option<ProgressEntry>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare("SELECT * FROM progress_entries WHERE item_key = ?1")?;

        let entry = stmt
            .query_row(params![item_key], |row| Self::row_to_entry(row))
            .optional()?;
        Ok(entry)
    }

    fn upsert(&self, entry: &ProgressEntry) -> Result<()> {
        let mistakes_json = serde_json::to_string(&entry.mistakes)?;

        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "INSERT INTO progress_entries (
                item_key, strength, last_reviewed, next_review,
                total_reviews, consecutive_correct, efactor, interval_days, mistakes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(item_key) DO UPDATE SET
                strength = excluded.strength,
                last_reviewed = excluded.last_reviewed,
                next_review = excluded.next_review,
                total_reviews = excluded.total_reviews,
                consecutive_correct = excluded.consecutive_correct,
                efactor = excluded.efactor,
                interval_days = excluded.interval_days,
                mistakes = excluded.mistakes",
            params![
                entry.item_key,
                entry.strength,
                entry.last_reviewed.to_rfc3339(),
                entry.next_review.to_rfc3339(),
                entry.total_reviews,
                entry.consecutive_correct,
                entry.efactor,
                entry.interval,
                mistakes_json,
            ],
        )?;
        Ok(())
    }

    fn all(&self) -> Result<Vec<ProgressEntry>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare("SELECT * FROM progress_entries")?;

        let rows = stmt.query_map([], |row| Self::row_to_entry(row))?;

        let mut result = Vec::new();
        for entry in rows {
            result.push(entry?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (SqliteProgressStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteProgressStore::new(Some(dir.path().join("test.db"))).unwrap();
        (store, dir)
    }

    fn populated_entry(key: &str) -> ProgressEntry {
        let now = Utc::now();
        let mut entry = ProgressEntry::new(key, now);
        entry.strength = 0.375;
        entry.total_reviews = 5;
        entry.consecutive_correct = 2;
        entry.efactor = 2.18;
        entry.interval = 6;
        entry.next_review = now + chrono::Duration::days(6);
        entry.mistakes.push(Mistake {
            quality: 2,
            recorded_at: now,
        });
        entry
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (store, _dir) = test_store();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_roundtrip_preserves_every_field() {
        let (store, _dir) = test_store();
        let entry = populated_entry("verse-1");

        store.upsert(&entry).unwrap();
        let fetched = store.get("verse-1").unwrap().unwrap();

        assert_eq!(fetched, entry);
    }

    #[test]
    fn test_upsert_replaces_existing_row() {
        let (store, _dir) = test_store();
        let mut entry = populated_entry("verse-1");
        store.upsert(&entry).unwrap();

        entry.strength = 0.9;
        entry.total_reviews = 6;
        store.upsert(&entry).unwrap();

        let fetched = store.get("verse-1").unwrap().unwrap();
        assert_eq!(fetched.strength, 0.9);
        assert_eq!(fetched.total_reviews, 6);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let entry = populated_entry("verse-1");

        {
            let store = SqliteProgressStore::new(Some(path.clone())).unwrap();
            store.upsert(&entry).unwrap();
        }

        let reopened = SqliteProgressStore::new(Some(path)).unwrap();
        let fetched = reopened.get("verse-1").unwrap().unwrap();
        assert_eq!(fetched, entry);
    }

    #[test]
    fn test_initialize_creates_then_returns_existing() {
        let (store, _dir) = test_store();

        let created = store.initialize("verse-1").unwrap();
        assert_eq!(created.total_reviews, 0);

        let again = store.initialize("verse-1").unwrap();
        assert_eq!(created, again);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_all_returns_every_row() {
        let (store, _dir) = test_store();
        for key in ["a", "b", "c"] {
            store.upsert(&ProgressEntry::new(key, Utc::now())).unwrap();
        }

        let mut keys: Vec<String> = store
            .all()
            .unwrap()
            .into_iter()
            .map(|e| e.item_key)
            .collect();
        keys.sort();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
