//! Dashboard figures.

use sphere_app::{context::AppContext, reports};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Tabled)]
struct MeritRow {
    username: String,
    merit_points: u64,
}

pub async fn run(ctx: &AppContext) -> Result<(), CliError> {
    let mut orders = ctx.orders();
    orders.load().await?;

    let mut users = ctx.users();
    users.load().await?;

    let totals = reports::order_totals(orders.orders());
    println!("total delivered: Ksh. {}", totals.delivered);
    println!("total pending:   Ksh. {}", totals.pending);

    let rows: Vec<MeritRow> = reports::merit_leaders(users.users())
        .into_iter()
        .map(|entry| MeritRow {
            username: entry.username,
            merit_points: entry.merit_points,
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}
