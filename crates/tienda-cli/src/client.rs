//! Async HTTP client wrapping the storefront's REST API.
//!
//! Two Xano API groups back the app: the main group (products, users,
//! orders) and the auth group (login, register). Authenticated calls
//! carry the bearer token saved in the local session.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, StatusCode};
use tienda_core::user::Role;

use crate::{
  requests::{
    CreateOrderRequest, LoginRequest, ProductForm, RegisterRequest,
    UpdateUserProfileRequest, UpdateUserRoleRequest,
  },
  responses::{AuthResponse, ProductRecord, SubmittedOrder, UserRecord},
};

/// Connection settings for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub auth_url: String,
  pub token:    Option<String>,
}

/// Async HTTP client for the storefront REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  /// A copy of this client using `token` for authenticated calls. Used
  /// right after login, before the token has been persisted.
  pub fn with_token(&self, token: &str) -> Self {
    let mut config = self.config.clone();
    config.token = Some(token.to_owned());
    Self { client: self.client.clone(), config }
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
  }

  fn auth_url(&self, path: &str) -> String {
    format!("{}/{path}", self.config.auth_url.trim_end_matches('/'))
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.config.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST auth/login`
  pub async fn login(
    &self,
    email: &str,
    password: &str,
  ) -> Result<AuthResponse> {
    let resp = self
      .client
      .post(self.auth_url("auth/login"))
      .json(&LoginRequest { email, password })
      .send()
      .await
      .context("POST auth/login failed")?;

    match resp.status() {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        Err(anyhow!("invalid credentials"))
      }
      status if !status.is_success() => {
        Err(anyhow!("POST auth/login → {status}"))
      }
      _ => resp.json().await.context("deserialising auth response"),
    }
  }

  /// `POST auth/register` — accounts always start as clients.
  pub async fn register(
    &self,
    email: &str,
    password: &str,
    name: &str,
  ) -> Result<AuthResponse> {
    let resp = self
      .client
      .post(self.auth_url("auth/register"))
      .json(&RegisterRequest { email, password, name, role: Role::Client })
      .send()
      .await
      .context("POST auth/register failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST auth/register → {}", resp.status()));
    }
    resp.json().await.context("deserialising auth response")
  }

  // ── Products ──────────────────────────────────────────────────────────────

  /// `GET product`
  pub async fn products(&self) -> Result<Vec<ProductRecord>> {
    let resp = self
      .auth(self.client.get(self.url("product")))
      .send()
      .await
      .context("GET product failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET product → {}", resp.status()));
    }
    resp.json().await.context("deserialising products")
  }

  /// `GET product/{id}`
  pub async fn product(&self, id: i64) -> Result<ProductRecord> {
    let resp = self
      .auth(self.client.get(self.url(&format!("product/{id}"))))
      .send()
      .await
      .with_context(|| format!("GET product/{id} failed"))?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Err(anyhow!("product {id} not found"));
    }
    if !resp.status().is_success() {
      return Err(anyhow!("GET product/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising product")
  }

  /// `POST product`
  pub async fn create_product(
    &self,
    form: &ProductForm,
  ) -> Result<ProductRecord> {
    let resp = self
      .auth(self.client.post(self.url("product")))
      .json(form)
      .send()
      .await
      .context("POST product failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST product → {}", resp.status()));
    }
    resp.json().await.context("deserialising created product")
  }

  /// `PUT product/{id}` — replaces the whole record.
  pub async fn update_product(
    &self,
    id: i64,
    form: &ProductForm,
  ) -> Result<ProductRecord> {
    let resp = self
      .auth(self.client.put(self.url(&format!("product/{id}"))))
      .json(form)
      .send()
      .await
      .with_context(|| format!("PUT product/{id} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT product/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising updated product")
  }

  /// `DELETE product/{id}` — the response body carries nothing worth
  /// keeping.
  pub async fn delete_product(&self, id: i64) -> Result<()> {
    let resp = self
      .auth(self.client.delete(self.url(&format!("product/{id}"))))
      .send()
      .await
      .with_context(|| format!("DELETE product/{id} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("DELETE product/{id} → {}", resp.status()));
    }
    Ok(())
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  /// `GET account/my_team_members`
  pub async fn team_members(&self) -> Result<Vec<UserRecord>> {
    let resp = self
      .auth(self.client.get(self.url("account/my_team_members")))
      .send()
      .await
      .context("GET account/my_team_members failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET account/my_team_members → {}", resp.status()));
    }
    resp.json().await.context("deserialising team members")
  }

  /// `GET account/details`
  pub async fn account_details(&self) -> Result<UserRecord> {
    let resp = self
      .auth(self.client.get(self.url("account/details")))
      .send()
      .await
      .context("GET account/details failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET account/details → {}", resp.status()));
    }
    resp.json().await.context("deserialising account details")
  }

  /// `POST admin/user_role`
  pub async fn update_user_role(
    &self,
    user_id: i64,
    new_role: Role,
  ) -> Result<UserRecord> {
    let resp = self
      .auth(self.client.post(self.url("admin/user_role")))
      .json(&UpdateUserRoleRequest { user_id, new_role })
      .send()
      .await
      .context("POST admin/user_role failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST admin/user_role → {}", resp.status()));
    }
    resp.json().await.context("deserialising updated user")
  }

  /// `PATCH user/edit_profile`
  pub async fn update_user_profile(
    &self,
    request: &UpdateUserProfileRequest,
  ) -> Result<UserRecord> {
    let resp = self
      .auth(self.client.patch(self.url("user/edit_profile")))
      .json(request)
      .send()
      .await
      .context("PATCH user/edit_profile failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PATCH user/edit_profile → {}", resp.status()));
    }
    resp.json().await.context("deserialising updated profile")
  }

  // ── Orders ────────────────────────────────────────────────────────────────

  /// `POST orders` — submit a locally placed order to the backend.
  pub async fn submit_order(
    &self,
    request: &CreateOrderRequest,
  ) -> Result<SubmittedOrder> {
    let resp = self
      .auth(self.client.post(self.url("orders")))
      .json(request)
      .send()
      .await
      .context("POST orders failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST orders → {}", resp.status()));
    }
    resp.json().await.context("deserialising submitted order")
  }
}
