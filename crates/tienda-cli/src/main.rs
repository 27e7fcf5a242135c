//! `tienda` — command-line storefront client.
//!
//! Drives the local purchase flow (cart, checkout, order log, session)
//! against a SQLite database, and the remote storefront API for the
//! catalog, accounts, and order submission.
//!
//! # Usage
//!
//! ```
//! tienda login --email ana@example.com --password secret
//! tienda cart add 12 --qty 2
//! tienda checkout --name "Ana" --email ana@example.com \
//!   --phone 3001234567 --address "Calle 5 #10-20"
//! tienda orders list
//! ```

mod client;
mod commands;
mod requests;
mod responses;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client::{ApiClient, ApiConfig};
use commands::{Commands, Ctx};
use serde::Deserialize;
use tienda_core::{cart::CartStore, orders::OrderLog, session::SessionStore};
use tienda_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "https://x8ki-letl-twmt.n7.xano.io/api:jgehxa2L";
const DEFAULT_AUTH_URL: &str = "https://x8ki-letl-twmt.n7.xano.io/api:jlcUx8g0";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tienda", about = "Command-line storefront client")]
struct Args {
  /// Path to a TOML config file (db, api_url, auth_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database holding the cart, orders, and session
  /// (default: tienda.db).
  #[arg(long, env = "TIENDA_DB")]
  db: Option<PathBuf>,

  /// Base URL of the storefront API.
  #[arg(long, env = "TIENDA_API_URL")]
  api_url: Option<String>,

  /// Base URL of the authentication API.
  #[arg(long, env = "TIENDA_AUTH_URL")]
  auth_url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db:       String,
  #[serde(default)]
  api_url:  String,
  #[serde(default)]
  auth_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Initialise tracing. Default to warnings only; the CLI's own output
  // goes to stdout, not the log.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let db_path = args
    .db
    .or_else(|| (!file_cfg.db.is_empty()).then(|| PathBuf::from(&file_cfg.db)))
    .unwrap_or_else(|| PathBuf::from("tienda.db"));
  let base_url = args
    .api_url
    .or_else(|| {
      (!file_cfg.api_url.is_empty()).then(|| file_cfg.api_url.clone())
    })
    .unwrap_or_else(|| DEFAULT_API_URL.to_string());
  let auth_url = args
    .auth_url
    .or_else(|| {
      (!file_cfg.auth_url.is_empty()).then(|| file_cfg.auth_url.clone())
    })
    .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());

  tracing::debug!(path = %db_path.display(), "opening store");
  let store = SqliteStore::open(&db_path)
    .with_context(|| format!("opening store at {}", db_path.display()))?;

  let sessions = SessionStore::new(store.clone());
  let token = sessions.token()?;

  let api = ApiClient::new(ApiConfig { base_url, auth_url, token })?;
  let ctx = Ctx {
    cart: CartStore::new(store.clone()),
    orders: OrderLog::new(store),
    sessions,
    api,
  };

  commands::run(&ctx, args.command).await
}
