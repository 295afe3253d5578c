//! The local cart and checkout.
//!
//! The cart is client-only state; between invocations it lives in a JSON
//! file next to the session blob.

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand};
use sphere_app::{
    cart::{Cart, CartLine},
    catalog::ProductId,
    config::AppConfig,
    context::AppContext,
};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove a product from the cart
    Remove(LineArgs),
    /// Increase a line's quantity by one
    Increment(LineArgs),
    /// Decrease a line's quantity by one (never below 1)
    Decrement(LineArgs),
    /// Show the cart and its total
    Show,
    /// Place an order for the cart's contents
    Checkout,
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id to add
    product_id: i64,

    /// Quantity for the line
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Product id of the cart line
    product_id: i64,
}

#[derive(Tabled)]
struct LineRow {
    id: i64,
    name: String,
    quantity: u32,
    subtotal: String,
}

impl From<&CartLine> for LineRow {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.into_raw(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            subtotal: format!("Ksh. {}", line.subtotal()),
        }
    }
}

fn load_cart(path: &Path) -> Cart {
    let Ok(text) = fs::read_to_string(path) else {
        return Cart::new();
    };
    match serde_json::from_str(&text) {
        Ok(cart) => cart,
        Err(error) => {
            tracing::warn!(error = %error, "ignoring corrupt cart file");
            Cart::new()
        }
    }
}

fn save_cart(path: &Path, cart: &Cart) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(cart)?)?;
    Ok(())
}

pub async fn run(
    ctx: &AppContext,
    config: &AppConfig,
    command: CartCommand,
) -> Result<(), CliError> {
    let mut cart = load_cart(&config.cart_file);

    match command.command {
        CartSubcommand::Add(args) => {
            let mut catalog = ctx.catalog();
            catalog.load().await?;

            let id = ProductId::from_raw(args.product_id);
            let product = catalog
                .products()
                .iter()
                .find(|product| product.id == id)
                .cloned()
                .ok_or("no such product")?;

            cart.add(product);
            cart.set_quantity(id, args.quantity);
            save_cart(&config.cart_file, &cart)?;
            println!("added product {id} to the cart");
        }
        CartSubcommand::Remove(args) => {
            cart.remove(ProductId::from_raw(args.product_id));
            save_cart(&config.cart_file, &cart)?;
            println!("removed product {} from the cart", args.product_id);
        }
        CartSubcommand::Increment(args) => {
            cart.increment(ProductId::from_raw(args.product_id));
            save_cart(&config.cart_file, &cart)?;
        }
        CartSubcommand::Decrement(args) => {
            cart.decrement(ProductId::from_raw(args.product_id));
            save_cart(&config.cart_file, &cart)?;
        }
        CartSubcommand::Show => {
            let rows: Vec<LineRow> = cart.lines().iter().map(LineRow::from).collect();
            println!("{}", Table::new(rows));
            println!("total: Ksh. {}", cart.total());
        }
        CartSubcommand::Checkout => {
            let order = ctx.orders().place(&cart).await?;
            cart.clear();
            save_cart(&config.cart_file, &cart)?;
            println!(
                "order {} placed, total Ksh. {}",
                order.id, order.total_amount
            );
        }
        CartSubcommand::Clear => {
            cart.clear();
            save_cart(&config.cart_file, &cart)?;
            println!("cart emptied");
        }
    }

    Ok(())
}
