//! Orders: immutable snapshots of a checked-out cart.
//!
//! An order is assembled once by [`build_order`] and never recomputed.
//! The total is what was quoted at checkout, even if the item list is
//! later found to disagree with it. Only the fulfilment status moves, and
//! the legal moves live in [`OrderStatus::can_transition`].

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart::LineItem, checkout::CheckoutForm};

/// Format of [`Order::created_at`], as the order screens display it.
const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

// ─── Status ──────────────────────────────────────────────────────────────────

/// Fulfilment stage of an order.
///
/// `Rejected` and `Shipped` are terminal. [`crate::orders::OrderLog`]
/// offers both a checked and an unchecked way to move between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Accepted,
  Rejected,
  Shipped,
}

impl OrderStatus {
  /// Whether the forward-only state machine allows moving to `next`.
  pub fn can_transition(self, next: OrderStatus) -> bool {
    matches!(
      (self, next),
      (Self::Pending, Self::Accepted)
        | (Self::Pending, Self::Rejected)
        | (Self::Accepted, Self::Shipped)
    )
  }

  /// The lowercase wire/storage name.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Accepted => "accepted",
      Self::Rejected => "rejected",
      Self::Shipped => "shipped",
    }
  }

  /// Human-readable label for list views.
  pub fn label(self) -> &'static str {
    match self {
      Self::Pending => "Pendiente",
      Self::Accepted => "Aceptado",
      Self::Rejected => "Rechazado",
      Self::Shipped => "Enviado",
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for OrderStatus {
  type Err = crate::Error;

  fn from_str(s: &str) -> crate::Result<Self> {
    match s {
      "pending" => Ok(Self::Pending),
      "accepted" => Ok(Self::Accepted),
      "rejected" => Ok(Self::Rejected),
      "shipped" => Ok(Self::Shipped),
      other => Err(crate::Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Order items ─────────────────────────────────────────────────────────────

/// An immutable copy of one cart line, minus the cart-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id:   String,
  pub product_name: String,
  pub quantity:     u32,
  pub unit_price:   Decimal,
}

impl From<&LineItem> for OrderItem {
  fn from(item: &LineItem) -> Self {
    Self {
      product_id:   item.product_id.clone(),
      product_name: item.product_name.clone(),
      quantity:     item.quantity,
      unit_price:   item.unit_price,
    }
  }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A placed order.
///
/// `id`, `total`, and `status` must be present when loading a persisted
/// record; every other field defaults when absent, so blobs written before
/// a field existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id:               String,
  #[serde(default)]
  pub owner_id:         String,
  #[serde(default)]
  pub items:            Vec<OrderItem>,
  pub total:            Decimal,
  pub status:           OrderStatus,
  #[serde(default)]
  pub customer_name:    String,
  #[serde(default)]
  pub customer_email:   String,
  #[serde(default)]
  pub customer_phone:   String,
  #[serde(default)]
  pub shipping_address: String,
  #[serde(default)]
  pub shipping_notes:   String,
  /// Creation time rendered as `dd/MM/yyyy HH:mm` in local time. Kept as
  /// a display string; orders are listed in insertion order, never sorted
  /// by parsing this back.
  #[serde(default)]
  pub created_at:       String,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build an [`Order`] from a cart snapshot plus the checkout form.
///
/// Pure construction: nothing is persisted and no store is touched.
/// `total` is taken verbatim rather than recomputed from `items`, so the
/// order records exactly what the customer was quoted. Empty `items` are
/// tolerated here; rejecting an empty cart is
/// [`crate::checkout::place_order`]'s job.
pub fn build_order(
  items: &[LineItem],
  total: Decimal,
  owner_id: &str,
  form: &CheckoutForm,
) -> Order {
  Order {
    id: Uuid::new_v4().to_string(),
    owner_id: owner_id.to_owned(),
    items: items.iter().map(OrderItem::from).collect(),
    total,
    status: OrderStatus::Pending,
    customer_name: form.customer_name.clone(),
    customer_email: form.customer_email.clone(),
    customer_phone: form.customer_phone.clone(),
    shipping_address: form.shipping_address.clone(),
    shipping_notes: form.shipping_notes.clone(),
    created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDateTime;

  use super::*;

  fn form() -> CheckoutForm {
    CheckoutForm {
      customer_name:    "Ana Torres".to_owned(),
      customer_email:   "ana@example.com".to_owned(),
      customer_phone:   "3001234567".to_owned(),
      shipping_address: "Calle 5 #10-20".to_owned(),
      shipping_notes:   String::new(),
    }
  }

  fn line(product_id: &str, price: i64, quantity: u32) -> LineItem {
    LineItem {
      id: "1700000000000".to_owned(),
      product_id: product_id.to_owned(),
      product_name: format!("Producto {product_id}"),
      unit_price: Decimal::from(price),
      product_image_ref: String::new(),
      quantity,
    }
  }

  // ── State machine ─────────────────────────────────────────────────────

  #[test]
  fn only_the_three_forward_moves_are_legal() {
    use OrderStatus::*;
    let all = [Pending, Accepted, Rejected, Shipped];

    for from in all {
      for to in all {
        let legal = matches!(
          (from, to),
          (Pending, Accepted) | (Pending, Rejected) | (Accepted, Shipped)
        );
        assert_eq!(from.can_transition(to), legal, "{from} -> {to}");
      }
    }
  }

  #[test]
  fn terminal_statuses_allow_nothing() {
    use OrderStatus::*;
    for to in [Pending, Accepted, Rejected, Shipped] {
      assert!(!Rejected.can_transition(to));
      assert!(!Shipped.can_transition(to));
    }
  }

  #[test]
  fn status_round_trips_through_its_wire_name() {
    use OrderStatus::*;
    for status in [Pending, Accepted, Rejected, Shipped] {
      assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
    }
    assert!("delivered".parse::<OrderStatus>().is_err());
  }

  #[test]
  fn status_serialises_lowercase() {
    let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
    assert_eq!(json, "\"pending\"");
  }

  // ── Builder ───────────────────────────────────────────────────────────

  #[test]
  fn builder_snapshots_items_and_form() {
    let items = [line("p1", 15000, 2), line("p2", 8000, 1)];
    let order = build_order(&items, Decimal::from(38000), "user-7", &form());

    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_id, "p1");
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.owner_id, "user-7");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_name, "Ana Torres");
    assert_eq!(order.shipping_address, "Calle 5 #10-20");
  }

  #[test]
  fn builder_takes_the_total_verbatim() {
    // The quoted total wins even when it disagrees with the items.
    let items = [line("p1", 15000, 1)];
    let order = build_order(&items, Decimal::from(1), "user-7", &form());
    assert_eq!(order.total, Decimal::from(1));
  }

  #[test]
  fn builder_assigns_fresh_ids() {
    let items = [line("p1", 15000, 1)];
    let a = build_order(&items, Decimal::from(15000), "user-7", &form());
    let b = build_order(&items, Decimal::from(15000), "user-7", &form());
    assert_ne!(a.id, b.id);
    assert!(Uuid::parse_str(&a.id).is_ok());
  }

  #[test]
  fn builder_stamps_a_parseable_creation_time() {
    let order = build_order(&[], Decimal::ZERO, "user-7", &form());
    assert!(
      NaiveDateTime::parse_from_str(&order.created_at, "%d/%m/%Y %H:%M")
        .is_ok(),
      "unexpected created_at: {}",
      order.created_at
    );
  }

  #[test]
  fn builder_tolerates_an_empty_item_list() {
    let order = build_order(&[], Decimal::ZERO, "user-7", &form());
    assert!(order.items.is_empty());
    assert_eq!(order.total, Decimal::ZERO);
  }

  // ── Persistence shape ─────────────────────────────────────────────────

  #[test]
  fn minimal_legacy_record_still_loads() {
    let order: Order = serde_json::from_str(
      r#"{ "id": "abc", "total": "15000", "status": "pending" }"#,
    )
    .unwrap();

    assert_eq!(order.id, "abc");
    assert_eq!(order.total, Decimal::from(15000));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.owner_id, "");
    assert!(order.items.is_empty());
    assert_eq!(order.created_at, "");
  }

  #[test]
  fn unknown_fields_in_a_record_are_ignored() {
    let order: Order = serde_json::from_str(
      r#"{
        "id": "abc",
        "total": "9.50",
        "status": "shipped",
        "tracking_code": "XYZ-1"
      }"#,
    )
    .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.total, Decimal::new(950, 2));
  }
}
