//! The locally persisted session: who is signed in, and as what.
//!
//! Signing in happens against the remote API; this store only keeps the
//! resulting user on the device, one field per key. Reads tolerate
//! missing fields so sessions written by older builds still load.

use crate::{
  Error, Result,
  kv::{KeyValueStore, NS_SESSION},
  user::{Role, User},
};

const KEY_USER_ID: &str = "user_id";
const KEY_EMAIL: &str = "email";
const KEY_NAME: &str = "name";
const KEY_ROLE: &str = "role";
const KEY_IS_LOGGED_IN: &str = "is_logged_in";
const KEY_AUTH_TOKEN: &str = "auth_token";

/// Owns the persisted session for this installation.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
  kv: S,
}

impl<S: KeyValueStore> SessionStore<S> {
  pub fn new(kv: S) -> Self {
    Self { kv }
  }

  /// Persist `user` as the signed-in session.
  pub fn save_session(&self, user: &User) -> Result<()> {
    self.put(KEY_USER_ID, &user.id)?;
    self.put(KEY_EMAIL, &user.email)?;
    self.put(KEY_NAME, &user.name)?;
    self.put(KEY_ROLE, user.role.as_str())?;
    self.put(KEY_IS_LOGGED_IN, "true")
  }

  /// Keep the API token next to the session it belongs to.
  pub fn save_token(&self, token: &str) -> Result<()> {
    self.put(KEY_AUTH_TOKEN, token)
  }

  /// The API token saved at sign-in, if any.
  pub fn token(&self) -> Result<Option<String>> {
    self.get(KEY_AUTH_TOKEN)
  }

  /// The signed-in user, or `None` when nobody is.
  ///
  /// Missing fields default to empty strings; a missing or unrecognised
  /// role reads as [`Role::Client`], never as admin.
  pub fn current_user(&self) -> Result<Option<User>> {
    if !self.is_logged_in()? {
      return Ok(None);
    }
    Ok(Some(User {
      id:        self.get(KEY_USER_ID)?.unwrap_or_default(),
      email:     self.get(KEY_EMAIL)?.unwrap_or_default(),
      name:      self.get(KEY_NAME)?.unwrap_or_default(),
      role:      decode_role(self.get(KEY_ROLE)?.as_deref()),
      is_active: true,
      phone:     None,
      address:   None,
    }))
  }

  pub fn is_logged_in(&self) -> Result<bool> {
    Ok(self.get(KEY_IS_LOGGED_IN)?.as_deref() == Some("true"))
  }

  /// Whether the signed-in user may drive admin operations.
  pub fn is_admin(&self) -> Result<bool> {
    Ok(self.get(KEY_ROLE)?.as_deref() == Some(Role::Admin.as_str()))
  }

  /// Drop every session field, token included. The cart lives in its own
  /// namespace; callers that also want it emptied clear it as a separate
  /// step.
  pub fn logout(&self) -> Result<()> {
    self.kv.clear(NS_SESSION).map_err(Error::storage)
  }

  fn get(&self, key: &str) -> Result<Option<String>> {
    self.kv.get(NS_SESSION, key).map_err(Error::storage)
  }

  fn put(&self, key: &str, value: &str) -> Result<()> {
    self.kv.put(NS_SESSION, key, value).map_err(Error::storage)
  }
}

/// Unknown or missing role strings decay to plain clients.
fn decode_role(role: Option<&str>) -> Role {
  match role {
    Some("admin") => Role::Admin,
    _ => Role::Client,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kv::MemoryStore;

  fn sessions() -> SessionStore<MemoryStore> {
    SessionStore::new(MemoryStore::new())
  }

  fn client_user() -> User {
    User {
      id:        "7".to_owned(),
      email:     "ana@example.com".to_owned(),
      name:      "Ana Torres".to_owned(),
      role:      Role::Client,
      is_active: true,
      phone:     None,
      address:   None,
    }
  }

  #[test]
  fn nobody_is_signed_in_initially() {
    let sessions = sessions();
    assert!(!sessions.is_logged_in().unwrap());
    assert!(!sessions.is_admin().unwrap());
    assert!(sessions.current_user().unwrap().is_none());
  }

  #[test]
  fn save_then_read_round_trips_the_user() {
    let sessions = sessions();
    sessions.save_session(&client_user()).unwrap();

    let user = sessions.current_user().unwrap().unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.name, "Ana Torres");
    assert_eq!(user.role, Role::Client);
    assert!(sessions.is_logged_in().unwrap());
  }

  #[test]
  fn admin_sessions_report_is_admin() {
    let sessions = sessions();
    let admin = User { role: Role::Admin, ..client_user() };
    sessions.save_session(&admin).unwrap();
    assert!(sessions.is_admin().unwrap());
  }

  #[test]
  fn client_sessions_do_not_report_is_admin() {
    let sessions = sessions();
    sessions.save_session(&client_user()).unwrap();
    assert!(!sessions.is_admin().unwrap());
  }

  #[test]
  fn unrecognised_stored_roles_decay_to_client() {
    let sessions = sessions();
    sessions.save_session(&client_user()).unwrap();
    sessions.kv.put(NS_SESSION, "role", "superuser").unwrap();

    let user = sessions.current_user().unwrap().unwrap();
    assert_eq!(user.role, Role::Client);
    assert!(!sessions.is_admin().unwrap());
  }

  #[test]
  fn token_round_trips_and_dies_with_the_session() {
    let sessions = sessions();
    sessions.save_session(&client_user()).unwrap();
    sessions.save_token("xano-token-123").unwrap();
    assert_eq!(sessions.token().unwrap().as_deref(), Some("xano-token-123"));

    sessions.logout().unwrap();
    assert_eq!(sessions.token().unwrap(), None);
  }

  #[test]
  fn logout_clears_the_whole_session() {
    let sessions = sessions();
    sessions.save_session(&client_user()).unwrap();
    sessions.logout().unwrap();

    assert!(!sessions.is_logged_in().unwrap());
    assert!(sessions.current_user().unwrap().is_none());
  }

  #[test]
  fn logout_leaves_other_namespaces_alone() {
    let kv = MemoryStore::new();
    let sessions = SessionStore::new(kv.clone());
    sessions.save_session(&client_user()).unwrap();
    kv.put(crate::kv::NS_CART, "cart_items", "[]").unwrap();

    sessions.logout().unwrap();
    assert!(kv.get(crate::kv::NS_CART, "cart_items").unwrap().is_some());
  }
}
