//! [`SqliteStore`] — the SQLite implementation of [`KeyValueStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use rusqlite::{Connection, OptionalExtension as _, params};
use tienda_core::kv::KeyValueStore;

use crate::{Result, schema::SCHEMA};

/// A Tienda store backed by a single SQLite file.
///
/// Cloning is cheap: clones share one reference-counted connection, so
/// every handle observes the same data, the same way two store objects
/// over one preferences file would.
#[derive(Clone)]
pub struct SqliteStore {
  conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  fn lock(&self) -> MutexGuard<'_, Connection> {
    self.conn.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for SqliteStore {
  type Error = crate::Error;

  fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
    let conn = self.lock();
    let value = conn
      .query_row(
        "SELECT value FROM kv WHERE namespace = ?1 AND key = ?2",
        params![namespace, key],
        |row| row.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
    let conn = self.lock();
    conn.execute(
      "INSERT INTO kv (namespace, key, value) VALUES (?1, ?2, ?3)
       ON CONFLICT (namespace, key) DO UPDATE SET value = excluded.value",
      params![namespace, key, value],
    )?;
    Ok(())
  }

  fn remove(&self, namespace: &str, key: &str) -> Result<()> {
    let conn = self.lock();
    conn.execute(
      "DELETE FROM kv WHERE namespace = ?1 AND key = ?2",
      params![namespace, key],
    )?;
    Ok(())
  }

  fn clear(&self, namespace: &str) -> Result<()> {
    let conn = self.lock();
    conn.execute("DELETE FROM kv WHERE namespace = ?1", params![namespace])?;
    Ok(())
  }
}
