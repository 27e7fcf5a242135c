//! SQL schema for the Tienda SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS kv (
    namespace  TEXT NOT NULL,   -- 'cart' | 'orders' | 'session'
    key        TEXT NOT NULL,
    value      TEXT NOT NULL,   -- whole serialised collection or field
    PRIMARY KEY (namespace, key)
);

PRAGMA user_version = 1;
";
