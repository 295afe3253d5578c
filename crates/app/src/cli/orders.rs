//! Orders and the delivery queue.

use clap::{Args, Subcommand};
use sphere_app::{
    context::AppContext,
    orders::{Order, OrderId, OrderStatus, OrdersService, repository::HttpOrdersRepository},
};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders (admin)
    List(ListArgs),
    /// Mark an order delivered (admin)
    Deliver(DeliverArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Filter by order-id substring
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct DeliverArgs {
    /// Order id to flip to delivered
    order_id: i64,
}

#[derive(Tabled)]
struct OrderRow {
    id: i64,
    customer: String,
    items: usize,
    total: String,
    status: String,
}

fn order_row(service: &OrdersService<HttpOrdersRepository>, order: &Order) -> OrderRow {
    OrderRow {
        id: order.id.into_raw(),
        customer: service
            .username(order.user_id)
            .unwrap_or_default()
            .to_string(),
        items: order.order_items.len(),
        total: format!("Ksh. {}", order.total_amount),
        status: match order.status {
            OrderStatus::Delivered => "delivered".to_string(),
            OrderStatus::Pending => "pending".to_string(),
        },
    }
}

pub async fn run(ctx: &AppContext, command: OrdersCommand) -> Result<(), CliError> {
    super::require_admin(ctx)?;

    match command.command {
        OrdersSubcommand::List(args) => {
            let mut orders = ctx.orders();
            orders.load().await?;
            orders.load_usernames().await;

            if let Some(term) = args.search {
                orders.search(term);
            }

            let rows: Vec<OrderRow> = orders
                .view()
                .into_iter()
                .map(|order| order_row(&orders, order))
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
        OrdersSubcommand::Deliver(args) => {
            let mut orders = ctx.orders();
            orders.load().await?;

            let id = OrderId::from_raw(args.order_id);
            orders.mark_delivered(id).await?;
            println!("order {id} marked delivered");
            Ok(())
        }
    }
}
