//! SQLite storage backend

use super::traits::{OpenStore, Store, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed key/value store
///
/// One row per key in `cache_entries`. Thread-safe via internal mutex on
/// the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );

            -- Concurrent reads while a refresh writes
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn connection(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Lock)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let conn = self.connection()?;
        conn.execute(
            r#"
            INSERT INTO cache_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let conn = self.connection()?;
        let deleted = conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = create_test_store();
        assert_eq!(store.get("thisobjectdoesnotexist").unwrap(), None);
    }

    #[test]
    fn test_put_then_get() {
        let store = create_test_store();
        store.put("test", b"this is a string value").unwrap();
        assert_eq!(
            store.get("test").unwrap().as_deref(),
            Some(&b"this is a string value"[..])
        );
    }

    #[test]
    fn test_put_overwrites() {
        let store = create_test_store();
        store.put("k", b"first").unwrap();
        store.put("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_remove() {
        let store = create_test_store();
        store.put("test", b"value").unwrap();
        assert!(store.remove("test").unwrap());
        assert!(!store.remove("test").unwrap());
        assert_eq!(store.get("test").unwrap(), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = create_test_store();
        store.put("a", b"1").unwrap();
        store.put("b", b"2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some(&b"2"[..]));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.put("myprofile", b"{}").unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("myprofile").unwrap().as_deref(), Some(&b"{}"[..]));
    }
}
