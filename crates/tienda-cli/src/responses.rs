//! Response records from the storefront API, and their conversions into
//! core types.
//!
//! Records are deserialised tolerantly: any field the backend might omit
//! gets a default, and unknown fields are ignored.

use rust_decimal::Decimal;
use serde::Deserialize;
use tienda_core::{
  product::Product,
  user::{Role, User},
};

// ─── Auth ────────────────────────────────────────────────────────────────────

/// What the auth endpoints return on success.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
  #[serde(rename = "authToken")]
  pub auth_token: String,
  #[serde(default)]
  pub user_id:    i64,
}

// ─── Products ────────────────────────────────────────────────────────────────

/// A catalog row as the backend stores it (Spanish column names, numeric
/// prices).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
  pub id:          i64,
  #[serde(default)]
  pub nombre:      String,
  #[serde(default, with = "rust_decimal::serde::float")]
  pub precio:      Decimal,
  #[serde(default)]
  pub color:       String,
  #[serde(default)]
  pub descripcion: String,
  #[serde(default)]
  pub imagen:      String,
  #[serde(default)]
  pub categoria:   String,
  #[serde(default)]
  pub images:      Vec<String>,
  #[serde(default)]
  pub stock:       i64,
  #[serde(rename = "isActive", default = "default_active")]
  pub is_active:   bool,
}

impl ProductRecord {
  /// Reduce a catalog row to what the purchase flow keeps about a
  /// product.
  pub fn into_product(self) -> Product {
    Product {
      id:         self.id.to_string(),
      name:       self.nombre,
      unit_price: self.precio,
      image_ref:  self.imagen,
    }
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// An account row as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
  pub id:        i64,
  #[serde(default)]
  pub email:     String,
  #[serde(default)]
  pub name:      String,
  #[serde(default)]
  pub role:      String,
  #[serde(rename = "isActive", default = "default_active")]
  pub is_active: bool,
  #[serde(default)]
  pub phone:     Option<String>,
  #[serde(default)]
  pub address:   Option<String>,
}

impl UserRecord {
  /// Convert to the core user type. Role strings the core does not know
  /// decay to client, the same rule the session store applies.
  pub fn into_user(self) -> User {
    User {
      id:        self.id.to_string(),
      email:     self.email,
      name:      self.name,
      role:      self.role.parse().unwrap_or(Role::Client),
      is_active: self.is_active,
      phone:     self.phone,
      address:   self.address,
    }
  }
}

// ─── Orders ──────────────────────────────────────────────────────────────────

/// Acknowledgement for a submitted order. The backend echoes the whole
/// created row; the numeric row id is the only part worth keeping.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedOrder {
  #[serde(default)]
  pub id: i64,
}

fn default_active() -> bool {
  true
}

// ─── Tests ───────────────────────────────────────────────────────────────────
