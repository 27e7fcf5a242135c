//! Cart commands: the local mutable half of the purchase flow.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{Ctx, money};

#[derive(Subcommand, Debug)]
pub enum CartCommands {
  /// Fetch a product from the catalog and add it to the cart.
  Add {
    /// Catalog product id.
    product_id: i64,

    /// Units to add.
    #[arg(long, default_value_t = 1)]
    qty: u32,
  },
  /// Show the cart.
  List,
  /// Replace the quantity on one line (0 removes it).
  SetQty {
    /// Product id of the line to change.
    product_id: String,
    qty:        i64,
  },
  /// Remove one line.
  Remove { product_id: String },
  /// Empty the whole cart.
  Clear,
}

pub async fn run(ctx: &Ctx, command: CartCommands) -> Result<()> {
  match command {
    CartCommands::Add { product_id, qty } => add(ctx, product_id, qty).await,
    CartCommands::List => list(ctx),
    CartCommands::SetQty { product_id, qty } => set_qty(ctx, &product_id, qty),
    CartCommands::Remove { product_id } => remove(ctx, &product_id),
    CartCommands::Clear => clear(ctx),
  }
}

async fn add(ctx: &Ctx, product_id: i64, qty: u32) -> Result<()> {
  // The cart snapshots the product as it is in the catalog right now.
  let product = ctx.api.product(product_id).await?.into_product();
  ctx.cart.add_to_cart(&product, qty)?;

  println!(
    "Added {qty} x {} ({each} each); cart total {total}",
    product.name,
    each = money(product.unit_price),
    total = money(ctx.cart.total()?)
  );
  Ok(())
}

fn list(ctx: &Ctx) -> Result<()> {
  let items = ctx.cart.items()?;
  if items.is_empty() {
    println!("The cart is empty.");
    return Ok(());
  }

  for item in &items {
    println!(
      "{:>4} x {:<28} {:>12} each  = {:>12}   (id {})",
      item.quantity,
      item.product_name,
      money(item.unit_price),
      money(item.line_total()),
      item.product_id
    );
  }
  println!(
    "Total: {} ({} items)",
    money(ctx.cart.total()?),
    ctx.cart.item_count()?
  );
  Ok(())
}

fn set_qty(ctx: &Ctx, product_id: &str, qty: i64) -> Result<()> {
  ctx.cart.update_quantity(product_id, qty)?;
  if qty <= 0 {
    println!("Removed {product_id} from the cart.");
  } else {
    println!("Set {product_id} to {qty}.");
  }
  Ok(())
}

fn remove(ctx: &Ctx, product_id: &str) -> Result<()> {
  ctx.cart.remove_from_cart(product_id)?;
  println!("Removed {product_id} from the cart.");
  Ok(())
}

fn clear(ctx: &Ctx) -> Result<()> {
  ctx.cart.clear_cart()?;
  println!("Cart emptied.");
  Ok(())
}
