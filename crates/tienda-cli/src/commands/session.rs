//! Session commands: signing in and out, and account maintenance.

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::{
  commands::{Ctx, signed_in_user},
  requests::UpdateUserProfileRequest,
};

// ─── Args ────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct LoginArgs {
  /// Account email.
  #[arg(long)]
  pub email: String,

  /// Account password.
  #[arg(long)]
  pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
  /// Account email.
  #[arg(long)]
  pub email: String,

  /// Account password.
  #[arg(long)]
  pub password: String,

  /// Display name.
  #[arg(long)]
  pub name: String,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
  /// New display name.
  #[arg(long)]
  pub name: Option<String>,

  /// New contact phone.
  #[arg(long)]
  pub phone: Option<String>,

  /// New address.
  #[arg(long)]
  pub address: Option<String>,
}

// ─── Handlers ────────────────────────────────────────────────────────────────

pub async fn login(ctx: &Ctx, args: LoginArgs) -> Result<()> {
  let auth = ctx.api.login(&args.email, &args.password).await?;

  // The token is not persisted yet; use it directly to fetch who we are.
  let api = ctx.api.with_token(&auth.auth_token);
  let user = api.account_details().await?.into_user();

  ctx.sessions.save_session(&user)?;
  ctx.sessions.save_token(&auth.auth_token)?;

  println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
  Ok(())
}

pub async fn register(ctx: &Ctx, args: RegisterArgs) -> Result<()> {
  let auth = ctx.api.register(&args.email, &args.password, &args.name).await?;

  let api = ctx.api.with_token(&auth.auth_token);
  let user = api.account_details().await?.into_user();

  ctx.sessions.save_session(&user)?;
  ctx.sessions.save_token(&auth.auth_token)?;

  println!("Account created; signed in as {} <{}>", user.name, user.email);
  Ok(())
}

pub fn logout(ctx: &Ctx) -> Result<()> {
  ctx.sessions.logout()?;
  ctx.cart.clear_cart()?;
  println!("Signed out; the cart was emptied.");
  Ok(())
}

pub fn whoami(ctx: &Ctx) -> Result<()> {
  match ctx.sessions.current_user()? {
    Some(user) => {
      println!("{} <{}> ({})", user.name, user.email, user.role);
    }
    None => println!("Nobody is signed in."),
  }
  Ok(())
}

pub async fn account(ctx: &Ctx) -> Result<()> {
  signed_in_user(ctx)?;
  let user = ctx.api.account_details().await?.into_user();

  println!("id:      {}", user.id);
  println!("name:    {}", user.name);
  println!("email:   {}", user.email);
  println!("role:    {}", user.role);
  println!("active:  {}", if user.is_active { "yes" } else { "no" });
  println!("phone:   {}", user.phone.as_deref().unwrap_or("-"));
  println!("address: {}", user.address.as_deref().unwrap_or("-"));
  Ok(())
}

pub async fn profile(ctx: &Ctx, args: ProfileArgs) -> Result<()> {
  if args.name.is_none() && args.phone.is_none() && args.address.is_none() {
    bail!("nothing to update; pass --name, --phone, or --address");
  }

  let me = signed_in_user(ctx)?;
  let user_id: i64 = me
    .id
    .parse()
    .context("the saved session has no numeric account id")?;

  let updated = ctx
    .api
    .update_user_profile(&UpdateUserProfileRequest {
      user_id,
      is_active: None,
      name: args.name,
      phone: args.phone,
      address: args.address,
    })
    .await?
    .into_user();

  // Keep the locally stored session fields in step with the backend.
  ctx.sessions.save_session(&updated)?;

  println!("Profile updated for {}", updated.email);
  Ok(())
}
