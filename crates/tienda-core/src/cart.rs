//! The active shopping cart: line items and the store that owns them.
//!
//! Every operation loads the whole persisted collection, mutates a copy in
//! memory, and writes the whole collection back. Concurrent writers race
//! as last-writer-wins; the deployment envelope is a single device with
//! one active session, so the race is accepted rather than locked around.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  kv::{KeyValueStore, NS_CART},
  product::Product,
};

const KEY_ITEMS: &str = "cart_items";

// ─── Line items ──────────────────────────────────────────────────────────────

/// One product entry in the cart.
///
/// Name, price, and image are snapshots taken when the product was first
/// added; catalog edits after that point do not flow into existing lines.
/// A persisted line item always has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  /// Millisecond-timestamp identifier assigned at add time. Display-only;
  /// every lookup keys on `product_id`.
  pub id:                String,
  pub product_id:        String,
  pub product_name:      String,
  pub unit_price:        Decimal,
  #[serde(default)]
  pub product_image_ref: String,
  pub quantity:          u32,
}

impl LineItem {
  /// Price of this line: unit price times quantity.
  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}

// ─── Cart store ──────────────────────────────────────────────────────────────

/// Owns the single active cart.
///
/// Construct one over a backend handle and pass it by reference; there is
/// no ambient global cart. Clones share the backend, not a cached item
/// list, so every read reflects the latest persisted state.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
  kv: S,
}

impl<S: KeyValueStore> CartStore<S> {
  pub fn new(kv: S) -> Self {
    Self { kv }
  }

  /// Add `quantity` units of `product`, merging with an existing line for
  /// the same product id.
  ///
  /// # Errors
  ///
  /// Returns [`Error::ZeroQuantity`] when `quantity` is zero; storage and
  /// serialisation failures propagate.
  pub fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<()> {
    if quantity == 0 {
      return Err(Error::ZeroQuantity);
    }

    let mut items = self.items()?;
    match items.iter_mut().find(|i| i.product_id == product.id) {
      Some(existing) => {
        existing.quantity = existing.quantity.saturating_add(quantity);
      }
      None => items.push(LineItem {
        id: Utc::now().timestamp_millis().to_string(),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        unit_price: product.unit_price,
        product_image_ref: product.image_ref.clone(),
        quantity,
      }),
    }
    self.save(&items)
  }

  /// The current line items, in insertion order.
  ///
  /// The returned vector is an owned snapshot; later cart mutations do not
  /// affect it. An empty or never-written cart reads as an empty vector.
  pub fn items(&self) -> Result<Vec<LineItem>> {
    match self.kv.get(NS_CART, KEY_ITEMS).map_err(Error::storage)? {
      Some(json) => Ok(serde_json::from_str(&json)?),
      None => Ok(Vec::new()),
    }
  }

  /// Replace the quantity on the line for `product_id`.
  ///
  /// A `new_quantity` of zero or below removes the line. An unknown
  /// product id is a no-op, not an error.
  pub fn update_quantity(
    &self,
    product_id: &str,
    new_quantity: i64,
  ) -> Result<()> {
    if new_quantity <= 0 {
      return self.remove_from_cart(product_id);
    }
    let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

    let mut items = self.items()?;
    match items.iter_mut().find(|i| i.product_id == product_id) {
      Some(item) => {
        item.quantity = quantity;
        self.save(&items)
      }
      None => Ok(()),
    }
  }

  /// Remove the line for `product_id`; a no-op when absent.
  pub fn remove_from_cart(&self, product_id: &str) -> Result<()> {
    let mut items = self.items()?;
    let before = items.len();
    items.retain(|i| i.product_id != product_id);
    if items.len() == before {
      return Ok(());
    }
    self.save(&items)
  }

  /// Discard the whole cart.
  pub fn clear_cart(&self) -> Result<()> {
    self.kv.remove(NS_CART, KEY_ITEMS).map_err(Error::storage)
  }

  /// Sum of `unit_price * quantity` over the current lines; zero when
  /// empty. Computed on demand, never stored.
  pub fn total(&self) -> Result<Decimal> {
    Ok(self.items()?.iter().map(LineItem::line_total).sum())
  }

  /// Sum of quantities over the current lines; zero when empty.
  pub fn item_count(&self) -> Result<u64> {
    Ok(self.items()?.iter().map(|i| u64::from(i.quantity)).sum())
  }

  fn save(&self, items: &[LineItem]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    self.kv.put(NS_CART, KEY_ITEMS, &json).map_err(Error::storage)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
