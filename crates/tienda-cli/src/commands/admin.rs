//! Administrative commands: order fulfilment, accounts, and catalog
//! maintenance. Every one of them requires an admin session.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tienda_core::{order::OrderStatus, user::Role};

use crate::{
  commands::{Ctx, money},
  requests::{ProductForm, UpdateUserProfileRequest},
};

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
  /// Move an order along pending → accepted → shipped, or reject it
  /// while pending.
  SetStatus {
    /// Order id (the UUID printed at checkout).
    order_id: String,
    /// Target status.
    status:   OrderStatus,
  },
  /// List the storefront's accounts.
  Users,
  /// Change an account's role.
  SetRole {
    /// Backend account id.
    user_id: i64,
    /// New role (admin or client).
    role:    Role,
  },
  /// Activate or deactivate an account.
  SetActive {
    /// Backend account id.
    user_id: i64,
    /// true to activate, false to deactivate.
    active:  bool,
  },
  /// Create a catalog product.
  AddProduct(ProductArgs),
  /// Replace a catalog product.
  UpdateProduct {
    /// Catalog product id.
    id:   i64,
    #[command(flatten)]
    form: ProductArgs,
  },
  /// Delete a catalog product.
  RemoveProduct {
    /// Catalog product id.
    id: i64,
  },
}

#[derive(Args, Debug)]
pub struct ProductArgs {
  /// Product name.
  #[arg(long)]
  pub name: String,

  /// Unit price.
  #[arg(long)]
  pub price: Decimal,

  /// Colour description.
  #[arg(long, default_value = "")]
  pub color: String,

  /// Long description.
  #[arg(long, default_value = "")]
  pub description: String,

  /// Main image URL.
  #[arg(long, default_value = "")]
  pub image: String,

  /// Catalog category.
  #[arg(long, default_value = "General")]
  pub category: String,

  /// Units in stock.
  #[arg(long, default_value_t = 0)]
  pub stock: i64,
}

impl ProductArgs {
  fn into_form(self) -> ProductForm {
    ProductForm {
      nombre:      self.name,
      precio:      self.price,
      color:       self.color,
      descripcion: self.description,
      imagen:      self.image,
      categoria:   self.category,
      stock:       self.stock,
      is_active:   true,
    }
  }
}

pub async fn run(ctx: &Ctx, command: AdminCommands) -> Result<()> {
  ensure_admin(ctx)?;
  match command {
    AdminCommands::SetStatus { order_id, status } => {
      set_status(ctx, &order_id, status)
    }
    AdminCommands::Users => users(ctx).await,
    AdminCommands::SetRole { user_id, role } => {
      set_role(ctx, user_id, role).await
    }
    AdminCommands::SetActive { user_id, active } => {
      set_active(ctx, user_id, active).await
    }
    AdminCommands::AddProduct(args) => add_product(ctx, args).await,
    AdminCommands::UpdateProduct { id, form } => {
      update_product(ctx, id, form).await
    }
    AdminCommands::RemoveProduct { id } => remove_product(ctx, id).await,
  }
}

/// Admin commands trust the locally stored role; the gate itself makes
/// no backend call.
fn ensure_admin(ctx: &Ctx) -> Result<()> {
  if !ctx.sessions.is_admin()? {
    bail!("this command needs an admin session");
  }
  Ok(())
}

fn set_status(ctx: &Ctx, order_id: &str, status: OrderStatus) -> Result<()> {
  let order = ctx.orders.transition_status(order_id, status)?;
  println!("Order {} is now {}.", order.id, order.status.label());
  Ok(())
}

async fn users(ctx: &Ctx) -> Result<()> {
  let members = ctx.api.team_members().await?;
  if members.is_empty() {
    println!("No accounts.");
    return Ok(());
  }

  println!(
    "{:>6}  {:<28} {:<24} {:<8} {}",
    "ID", "EMAIL", "NAME", "ROLE", "ACTIVE"
  );
  for member in &members {
    println!(
      "{:>6}  {:<28} {:<24} {:<8} {}",
      member.id,
      member.email,
      member.name,
      member.role,
      if member.is_active { "yes" } else { "no" }
    );
  }
  Ok(())
}

async fn set_role(ctx: &Ctx, user_id: i64, role: Role) -> Result<()> {
  let user = ctx.api.update_user_role(user_id, role).await?.into_user();
  println!("{} is now {}.", user.email, user.role);
  Ok(())
}

async fn set_active(ctx: &Ctx, user_id: i64, active: bool) -> Result<()> {
  let user = ctx
    .api
    .update_user_profile(&UpdateUserProfileRequest {
      user_id,
      is_active: Some(active),
      ..Default::default()
    })
    .await?
    .into_user();

  println!(
    "{} is now {}.",
    user.email,
    if user.is_active { "active" } else { "inactive" }
  );
  Ok(())
}

async fn add_product(ctx: &Ctx, args: ProductArgs) -> Result<()> {
  let created = ctx.api.create_product(&args.into_form()).await?;
  println!(
    "Created product {} ({}, {}).",
    created.id,
    created.nombre,
    money(created.precio)
  );
  Ok(())
}

async fn update_product(ctx: &Ctx, id: i64, args: ProductArgs) -> Result<()> {
  let updated = ctx.api.update_product(id, &args.into_form()).await?;
  println!("Updated product {} ({}).", updated.id, updated.nombre);
  Ok(())
}

async fn remove_product(ctx: &Ctx, id: i64) -> Result<()> {
  ctx.api.delete_product(id).await?;
  println!("Deleted product {id}.");
  Ok(())
}
