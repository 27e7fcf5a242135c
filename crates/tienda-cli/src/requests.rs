//! Request bodies for the storefront API.
//!
//! Field names match the backend's JSON contract exactly: snake_case
//! keys, numeric prices, lowercase role and status names.

use rust_decimal::Decimal;
use serde::Serialize;
use tienda_core::{
  order::{Order, OrderStatus},
  user::Role,
};

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
  pub email:    &'a str,
  pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
  pub email:    &'a str,
  pub password: &'a str,
  pub name:     &'a str,
  pub role:     Role,
}

// ─── Products ────────────────────────────────────────────────────────────────

/// Body for creating or replacing a catalog product. The backend keeps
/// its columns in Spanish; the CLI translates at this boundary and
/// nowhere else.
#[derive(Debug, Clone, Serialize)]
pub struct ProductForm {
  pub nombre:      String,
  #[serde(with = "rust_decimal::serde::float")]
  pub precio:      Decimal,
  pub color:       String,
  pub descripcion: String,
  pub imagen:      String,
  pub categoria:   String,
  pub stock:       i64,
  #[serde(rename = "isActive")]
  pub is_active:   bool,
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UpdateUserRoleRequest {
  pub user_id:  i64,
  pub new_role: Role,
}

/// Partial profile update; absent fields are left untouched by the
/// backend, so `None`s are omitted from the body entirely.
#[derive(Debug, Default, Serialize)]
pub struct UpdateUserProfileRequest {
  pub user_id:   i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:   Option<String>,
}

// ─── Orders ──────────────────────────────────────────────────────────────────

/// Body for submitting a locally placed order.
#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
  pub user_id:          String,
  #[serde(with = "rust_decimal::serde::float")]
  pub total:            Decimal,
  pub status:           OrderStatus,
  pub customer_name:    String,
  pub customer_email:   String,
  pub customer_phone:   String,
  pub shipping_address: String,
  pub shipping_notes:   String,
  pub items:            Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemRequest {
  pub product_id:   String,
  pub product_name: String,
  pub quantity:     u32,
  #[serde(with = "rust_decimal::serde::float")]
  pub price:        Decimal,
}

impl CreateOrderRequest {
  /// Map a local order onto the backend's contract, field for field.
  pub fn from_order(order: &Order) -> Self {
    let items = order
      .items
      .iter()
      .map(|item| OrderItemRequest {
        product_id:   item.product_id.clone(),
        product_name: item.product_name.clone(),
        quantity:     item.quantity,
        price:        item.unit_price,
      })
      .collect();

    Self {
      user_id: order.owner_id.clone(),
      total: order.total,
      status: order.status,
      customer_name: order.customer_name.clone(),
      customer_email: order.customer_email.clone(),
      customer_phone: order.customer_phone.clone(),
      shipping_address: order.shipping_address.clone(),
      shipping_notes: order.shipping_notes.clone(),
      items,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rust_decimal::Decimal;
  use serde_json::json;
  use tienda_core::order::OrderItem;

  use super::*;

  #[test]
  fn login_body_matches_the_contract() {
    let body = LoginRequest { email: "ana@example.com", password: "secreta" };
    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      json!({ "email": "ana@example.com", "password": "secreta" })
    );
  }

  #[test]
  fn register_body_always_carries_the_client_role() {
    let body = RegisterRequest {
      email:    "ana@example.com",
      password: "secreta",
      name:     "Ana",
      role:     Role::Client,
    };
    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      json!({
        "email": "ana@example.com",
        "password": "secreta",
        "name": "Ana",
        "role": "client",
      })
    );
  }

  #[test]
  fn product_form_uses_the_backend_column_names() {
    let form = ProductForm {
      nombre:      "Camiseta".to_owned(),
      precio:      Decimal::new(1999, 2),
      color:       "Negro".to_owned(),
      descripcion: "Algodón".to_owned(),
      imagen:      "https://img.example.com/c.png".to_owned(),
      categoria:   "Ropa".to_owned(),
      stock:       10,
      is_active:   true,
    };
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(value["nombre"], "Camiseta");
    assert_eq!(value["precio"], json!(19.99));
    assert_eq!(value["isActive"], json!(true));
    assert!(value.get("is_active").is_none());
  }

  #[test]
  fn profile_update_omits_untouched_fields() {
    let body = UpdateUserProfileRequest {
      user_id: 7,
      phone: Some("3001234567".to_owned()),
      ..Default::default()
    };
    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      json!({ "user_id": 7, "phone": "3001234567" })
    );
  }

  #[test]
  fn role_update_uses_lowercase_names() {
    let body = UpdateUserRoleRequest { user_id: 7, new_role: Role::Admin };
    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      json!({ "user_id": 7, "new_role": "admin" })
    );
  }

  #[test]
  fn order_submission_maps_every_field() {
    let items = vec![OrderItem {
      product_id:   "12".to_owned(),
      product_name: "Camiseta".to_owned(),
      quantity:     2,
      unit_price:   Decimal::from(15000),
    }];
    let order = Order {
      id: "uuid-1".to_owned(),
      owner_id: "42".to_owned(),
      items,
      total: Decimal::from(30000),
      status: OrderStatus::Pending,
      customer_name: "Ana Torres".to_owned(),
      customer_email: "ana@example.com".to_owned(),
      customer_phone: "3001234567".to_owned(),
      shipping_address: "Calle 5 #10-20".to_owned(),
      shipping_notes: String::new(),
      created_at: "01/06/2025 09:30".to_owned(),
    };

    let value =
      serde_json::to_value(CreateOrderRequest::from_order(&order)).unwrap();
    assert_eq!(value["user_id"], "42");
    assert_eq!(value["total"], json!(30000.0));
    assert_eq!(value["status"], "pending");
    assert_eq!(value["items"][0]["product_id"], "12");
    assert_eq!(value["items"][0]["quantity"], json!(2));
    assert_eq!(value["items"][0]["price"], json!(15000.0));
    // The local-only id and timestamp never cross the wire.
    assert!(value.get("id").is_none());
    assert!(value.get("created_at").is_none());
  }
}
