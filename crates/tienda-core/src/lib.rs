//! Core types and store logic for the Tienda storefront.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The three stores ([`cart::CartStore`], [`orders::OrderLog`],
//! [`session::SessionStore`]) are plain structs owning a handle to a
//! [`kv::KeyValueStore`] backend. Construct them explicitly and pass them
//! where they are needed; there is no ambient global state.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod kv;
pub mod order;
pub mod orders;
pub mod product;
pub mod session;
pub mod user;

pub use error::{Error, Result};
