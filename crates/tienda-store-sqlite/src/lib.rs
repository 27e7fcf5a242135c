//! SQLite backend for the Tienda key-value boundary.
//!
//! One table of `(namespace, key, value)` rows; values hold whole
//! serialised collections, written in full on every mutation. Access is
//! synchronous: the purchase flow's reads and writes are small and rare,
//! so callers that care about latency simply do them off the hot path.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
