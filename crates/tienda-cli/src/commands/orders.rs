//! Order commands: inspect the local order log and submit orders to the
//! backend.

use anyhow::{Context, Result};
use clap::Subcommand;
use tienda_core::order::{Order, OrderStatus};

use crate::{
  commands::{Ctx, money},
  requests::CreateOrderRequest,
};

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
  /// List placed orders, newest first.
  List {
    /// Only show orders in this status.
    #[arg(long)]
    status: Option<OrderStatus>,

    /// Filter by order id or customer name.
    #[arg(long)]
    search: Option<String>,
  },
  /// Show one order in full.
  Show {
    /// Order id (the UUID printed at checkout).
    id: String,
  },
  /// Submit a placed order to the storefront backend.
  Sync {
    /// Order id to submit.
    id: String,
  },
}

pub async fn run(ctx: &Ctx, command: OrderCommands) -> Result<()> {
  match command {
    OrderCommands::List { status, search } => list(ctx, status, search),
    OrderCommands::Show { id } => show(ctx, &id),
    OrderCommands::Sync { id } => sync(ctx, &id).await,
  }
}

fn list(
  ctx: &Ctx,
  status: Option<OrderStatus>,
  search: Option<String>,
) -> Result<()> {
  let needle = search.map(|s| s.to_lowercase());
  let orders: Vec<Order> = ctx
    .orders
    .orders()?
    .into_iter()
    .filter(|o| status.is_none_or(|s| o.status == s))
    .filter(|o| {
      needle.as_deref().is_none_or(|n| {
        o.id.to_lowercase().contains(n)
          || o.customer_name.to_lowercase().contains(n)
      })
    })
    .collect();

  if orders.is_empty() {
    println!("No orders.");
    return Ok(());
  }

  for order in &orders {
    println!(
      "{}  {:<16}  {:<9}  {:>12}  {}",
      &order.id[..8.min(order.id.len())],
      order.created_at,
      order.status.label(),
      money(order.total),
      order.customer_name
    );
  }
  Ok(())
}

fn show(ctx: &Ctx, id: &str) -> Result<()> {
  let order = ctx
    .orders
    .order_by_id(id)?
    .with_context(|| format!("order {id} not found"))?;

  println!("order:    {}", order.id);
  println!("placed:   {}", order.created_at);
  println!("status:   {} ({})", order.status.label(), order.status);
  println!("owner:    {}", order.owner_id);
  println!("customer: {} <{}>", order.customer_name, order.customer_email);
  println!("phone:    {}", order.customer_phone);
  println!("address:  {}", order.shipping_address);
  if !order.shipping_notes.is_empty() {
    println!("notes:    {}", order.shipping_notes);
  }
  println!("items:");
  for item in &order.items {
    println!(
      "  {:>4} x {:<28} {:>12} each",
      item.quantity,
      item.product_name,
      money(item.unit_price)
    );
  }
  println!("total:    {}", money(order.total));
  Ok(())
}

async fn sync(ctx: &Ctx, id: &str) -> Result<()> {
  let order = ctx
    .orders
    .order_by_id(id)?
    .with_context(|| format!("order {id} not found"))?;

  let submitted =
    ctx.api.submit_order(&CreateOrderRequest::from_order(&order)).await?;

  println!("Order {} submitted; backend row {}.", order.id, submitted.id);
  Ok(())
}
