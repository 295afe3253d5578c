//! Catalog browsing.

use clap::Args;
use sphere_app::{catalog::Product, context::AppContext};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Filter by name substring
    #[arg(long)]
    search: Option<String>,

    /// Restrict to one category
    #[arg(long)]
    category: Option<String>,

    /// List the categories instead of the products
    #[arg(long)]
    categories: bool,
}

#[derive(Tabled)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    category: String,
    rating: u8,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.into_raw(),
            name: product.name.clone(),
            price: format!("Ksh. {}", product.price),
            category: product.category.clone(),
            rating: product.rating,
        }
    }
}

pub async fn run(ctx: &AppContext, args: ProductsArgs) -> Result<(), CliError> {
    let mut catalog = ctx.catalog();
    catalog.load().await?;

    if args.categories {
        for category in catalog.categories() {
            println!("{category}");
        }
        return Ok(());
    }

    if let Some(term) = args.search {
        catalog.search(term);
    }
    if let Some(category) = args.category {
        catalog.filter_category(category);
    }

    let rows: Vec<ProductRow> = catalog.view().into_iter().map(ProductRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
