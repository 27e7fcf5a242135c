//! User and role types shared by the session store and the remote layer.

use serde::{Deserialize, Serialize};

// ─── Role ────────────────────────────────────────────────────────────────────

/// What a signed-in user is allowed to do.
///
/// Only `Admin` may drive order-status transitions and catalog mutation;
/// everything else is `Client`. Unknown role strings read back from
/// storage decay to `Client`, never to `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Client,
}

impl Role {
  /// The lowercase wire/storage name.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Client => "client",
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Role {
  type Err = crate::Error;

  fn from_str(s: &str) -> crate::Result<Self> {
    match s {
      "admin" => Ok(Self::Admin),
      "client" => Ok(Self::Client),
      other => Err(crate::Error::UnknownRole(other.to_owned())),
    }
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

/// An account, either the signed-in one or a row in the admin user list.
///
/// `phone` and `address` exist only on accounts that have filled in their
/// profile; the session store does not persist them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:        String,
  pub email:     String,
  #[serde(default)]
  pub name:      String,
  pub role:      Role,
  #[serde(default = "default_active")]
  pub is_active: bool,
  #[serde(default)]
  pub phone:     Option<String>,
  #[serde(default)]
  pub address:   Option<String>,
}

fn default_active() -> bool {
  true
}

// ─── Tests ───────────────────────────────────────────────────────────────────
