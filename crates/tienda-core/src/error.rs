//! Error types for `tienda-core`.

use thiserror::Error;

use crate::order::OrderStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("quantity must be at least 1")]
  ZeroQuantity,

  #[error("cart is empty")]
  EmptyCart,

  #[error("checkout field `{0}` must not be empty")]
  MissingField(&'static str),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("order not found: {0}")]
  OrderNotFound(String),

  #[error("cannot move an order from `{from}` to `{to}`")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error("unknown order status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),
}

impl Error {
  /// Box an arbitrary backend error into [`Error::Storage`].
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
