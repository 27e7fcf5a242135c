//! The checkout command: cart plus form in, order out.

use anyhow::Result;
use clap::Args;
use tienda_core::checkout::{CheckoutForm, place_order};

use crate::commands::{Ctx, money};

#[derive(Args, Debug)]
pub struct CheckoutArgs {
  /// Customer full name.
  #[arg(long)]
  pub name: String,

  /// Contact email for the order.
  #[arg(long)]
  pub email: String,

  /// Contact phone.
  #[arg(long)]
  pub phone: String,

  /// Shipping address.
  #[arg(long)]
  pub address: String,

  /// Optional delivery notes.
  #[arg(long, default_value = "")]
  pub notes: String,
}

pub fn checkout(ctx: &Ctx, args: CheckoutArgs) -> Result<()> {
  // Checkout never forces a login; orders placed signed out carry a
  // placeholder owner marker.
  let owner = ctx
    .sessions
    .current_user()?
    .map_or_else(|| "current_user".to_owned(), |user| user.id);

  let form = CheckoutForm {
    customer_name:    args.name,
    customer_email:   args.email,
    customer_phone:   args.phone,
    shipping_address: args.address,
    shipping_notes:   args.notes,
  };

  let order = place_order(&ctx.cart, &ctx.orders, &owner, &form)?;

  println!("Order {} placed. Total {}.", order.id, money(order.total));
  println!("Track it with `tienda orders show {}`.", order.id);
  Ok(())
}
