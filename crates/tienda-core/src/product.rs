//! Product — the catalog entry the cart snapshots from.
//!
//! The catalog itself lives behind the remote API; the purchase flow only
//! ever sees this reduced shape. Everything a cart line or an order keeps
//! about a product is copied out of it at add time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product, as the purchase flow sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:         String,
  pub name:       String,
  pub unit_price: Decimal,
  /// Opaque reference to the product image (a URL in practice).
  #[serde(default)]
  pub image_ref:  String,
}
