//! Checkout: validate the form, snapshot the cart into an order, persist
//! it, and release the cart.

use rust_decimal::Decimal;

use crate::{
  Error, Result,
  cart::{CartStore, LineItem},
  kv::KeyValueStore,
  order::{Order, build_order},
  orders::OrderLog,
};

// ─── Form ────────────────────────────────────────────────────────────────────

/// Free-text fields captured at checkout and copied onto the order
/// verbatim.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
  pub customer_name:    String,
  pub customer_email:   String,
  pub customer_phone:   String,
  pub shipping_address: String,
  /// Delivery instructions; the only field allowed to stay empty.
  pub shipping_notes:   String,
}

impl CheckoutForm {
  /// Check that every required field is filled in and the email at least
  /// looks like an address.
  ///
  /// # Errors
  ///
  /// [`Error::MissingField`] names the first empty required field;
  /// [`Error::InvalidEmail`] follows once all fields are present.
  pub fn validate(&self) -> Result<()> {
    if self.customer_name.trim().is_empty() {
      return Err(Error::MissingField("customer_name"));
    }
    if self.customer_email.trim().is_empty() {
      return Err(Error::MissingField("customer_email"));
    }
    if self.customer_phone.trim().is_empty() {
      return Err(Error::MissingField("customer_phone"));
    }
    if self.shipping_address.trim().is_empty() {
      return Err(Error::MissingField("shipping_address"));
    }
    if !looks_like_email(&self.customer_email) {
      return Err(Error::InvalidEmail(self.customer_email.clone()));
    }
    Ok(())
  }
}

/// Minimal shape check: one `@`, a non-empty local part, and a dotted
/// domain. Deliverability is the backend's problem.
fn looks_like_email(s: &str) -> bool {
  match s.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
    }
    None => false,
  }
}

// ─── Placing an order ────────────────────────────────────────────────────────

/// Run the full checkout sequence: validate the form, reject an empty
/// cart, build the order, save it, clear the cart.
///
/// The save and the clear are independent writes to two namespaces, not a
/// transaction. If the clear fails after the save the order exists with a
/// stale cart left behind, and the error of the failing step surfaces.
pub fn place_order<S: KeyValueStore>(
  cart: &CartStore<S>,
  log: &OrderLog<S>,
  owner_id: &str,
  form: &CheckoutForm,
) -> Result<Order> {
  form.validate()?;

  let items = cart.items()?;
  if items.is_empty() {
    return Err(Error::EmptyCart);
  }
  // Total and items must come from one snapshot; the cart can move
  // between reads.
  let total: Decimal = items.iter().map(LineItem::line_total).sum();

  let order = build_order(&items, total, owner_id, form);
  log.save_order(&order)?;
  cart.clear_cart()?;

  Ok(order)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
