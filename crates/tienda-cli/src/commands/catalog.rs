//! Catalog commands: browse what the storefront sells.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{Ctx, money};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
  /// List the storefront catalog.
  List,
  /// Show one product in full.
  Show {
    /// Catalog product id.
    id: i64,
  },
}

pub async fn run(ctx: &Ctx, command: CatalogCommands) -> Result<()> {
  match command {
    CatalogCommands::List => list(ctx).await,
    CatalogCommands::Show { id } => show(ctx, id).await,
  }
}

async fn list(ctx: &Ctx) -> Result<()> {
  let products = ctx.api.products().await?;
  if products.is_empty() {
    println!("The catalog is empty.");
    return Ok(());
  }

  println!(
    "{:>6}  {:<28} {:>12}  {:>6}  {}",
    "ID", "NAME", "PRICE", "STOCK", "ACTIVE"
  );
  for product in &products {
    println!(
      "{:>6}  {:<28} {:>12}  {:>6}  {}",
      product.id,
      product.nombre,
      money(product.precio),
      product.stock,
      if product.is_active { "yes" } else { "no" }
    );
  }
  Ok(())
}

async fn show(ctx: &Ctx, id: i64) -> Result<()> {
  let product = ctx.api.product(id).await?;

  println!("id:          {}", product.id);
  println!("name:        {}", product.nombre);
  println!("price:       {}", money(product.precio));
  println!("color:       {}", product.color);
  println!("category:    {}", product.categoria);
  println!("stock:       {}", product.stock);
  println!("active:      {}", if product.is_active { "yes" } else { "no" });
  println!("image:       {}", product.imagen);
  if !product.images.is_empty() {
    println!("gallery:     {}", product.images.join(", "));
  }
  println!("description: {}", product.descripcion);
  Ok(())
}
