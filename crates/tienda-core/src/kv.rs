//! The `KeyValueStore` trait and an in-memory implementation.
//!
//! Persistence in Tienda is a namespaced string-to-string map: each store
//! serialises its whole collection to one value and writes it back on every
//! mutation. The trait is implemented by storage backends (e.g.
//! `tienda-store-sqlite`); the stores in this crate depend on the
//! abstraction, not on any concrete backend.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Namespaces ──────────────────────────────────────────────────────────────

/// Namespace holding the active cart.
pub const NS_CART: &str = "cart";
/// Namespace holding the order log.
pub const NS_ORDERS: &str = "orders";
/// Namespace holding the signed-in session, one field per key.
pub const NS_SESSION: &str = "session";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a namespaced key-value backend.
///
/// Values are opaque strings; all serialisation happens in the callers.
/// Writes are synchronous and durable on return. Keys are scoped per
/// namespace, so `clear` on one namespace never touches another.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The value stored under `(namespace, key)`, if any.
  fn get(
    &self,
    namespace: &str,
    key: &str,
  ) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `(namespace, key)`, replacing any previous value.
  fn put(
    &self,
    namespace: &str,
    key: &str,
    value: &str,
  ) -> Result<(), Self::Error>;

  /// Delete the value under `(namespace, key)`; a no-op when absent.
  fn remove(&self, namespace: &str, key: &str) -> Result<(), Self::Error>;

  /// Delete every key in `namespace`.
  fn clear(&self, namespace: &str) -> Result<(), Self::Error>;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A [`KeyValueStore`] holding everything in a shared map.
///
/// Clones share the same underlying map, mirroring how file-backed
/// backends share one database. Nothing survives the process; intended for
/// tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<HashMap<(String, String), String>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(
    &self,
  ) -> std::sync::MutexGuard<'_, HashMap<(String, String), String>> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get(
    &self,
    namespace: &str,
    key: &str,
  ) -> Result<Option<String>, Infallible> {
    Ok(self.lock().get(&(namespace.to_owned(), key.to_owned())).cloned())
  }

  fn put(
    &self,
    namespace: &str,
    key: &str,
    value: &str,
  ) -> Result<(), Infallible> {
    self
      .lock()
      .insert((namespace.to_owned(), key.to_owned()), value.to_owned());
    Ok(())
  }

  fn remove(&self, namespace: &str, key: &str) -> Result<(), Infallible> {
    self.lock().remove(&(namespace.to_owned(), key.to_owned()));
    Ok(())
  }

  fn clear(&self, namespace: &str) -> Result<(), Infallible> {
    self.lock().retain(|(ns, _), _| ns != namespace);
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
