//! CLI command definitions and dispatch.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod session;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use rust_decimal::Decimal;
use tienda_core::{
  cart::CartStore, orders::OrderLog, session::SessionStore, user::User,
};
use tienda_store_sqlite::SqliteStore;

use crate::client::ApiClient;

/// Everything a command needs: the three local stores plus the API client.
pub struct Ctx {
  pub cart:     CartStore<SqliteStore>,
  pub orders:   OrderLog<SqliteStore>,
  pub sessions: SessionStore<SqliteStore>,
  pub api:      ApiClient,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Sign in and save the session locally.
  Login(session::LoginArgs),
  /// Create an account and sign in.
  Register(session::RegisterArgs),
  /// Drop the saved session and empty the cart.
  Logout,
  /// Show the locally saved session.
  Whoami,
  /// Fetch the signed-in account's details from the backend.
  Account,
  /// Update the signed-in account's profile.
  Profile(session::ProfileArgs),
  /// Browse the storefront catalog.
  #[command(subcommand)]
  Catalog(catalog::CatalogCommands),
  /// Manage the local cart.
  #[command(subcommand)]
  Cart(cart::CartCommands),
  /// Turn the cart into an order.
  Checkout(checkout::CheckoutArgs),
  /// Inspect placed orders.
  #[command(subcommand)]
  Orders(orders::OrderCommands),
  /// Administrative operations; needs an admin session.
  #[command(subcommand)]
  Admin(admin::AdminCommands),
}

pub async fn run(ctx: &Ctx, command: Commands) -> Result<()> {
  match command {
    Commands::Login(args) => session::login(ctx, args).await,
    Commands::Register(args) => session::register(ctx, args).await,
    Commands::Logout => session::logout(ctx),
    Commands::Whoami => session::whoami(ctx),
    Commands::Account => session::account(ctx).await,
    Commands::Profile(args) => session::profile(ctx, args).await,
    Commands::Catalog(command) => catalog::run(ctx, command).await,
    Commands::Cart(command) => cart::run(ctx, command).await,
    Commands::Checkout(args) => checkout::checkout(ctx, args),
    Commands::Orders(command) => orders::run(ctx, command).await,
    Commands::Admin(command) => admin::run(ctx, command).await,
  }
}

/// Render a money amount the way the order screens do.
pub fn money(amount: Decimal) -> String {
  format!("${amount}")
}

/// The signed-in user, or a friendly error telling the caller to log in.
pub fn signed_in_user(ctx: &Ctx) -> Result<User> {
  ctx
    .sessions
    .current_user()?
    .context("nobody is signed in; run `tienda login` first")
}
