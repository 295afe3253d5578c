//! Dashboard aggregation.
//!
//! Pure reductions over already-loaded collections; chart rendering is
//! someone else's job.

use rust_decimal::Decimal;

use crate::orders::models::{Order, OrderStatus};
use crate::users::models::User;

/// Order value split by delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderTotals {
    pub delivered: Decimal,
    pub pending: Decimal,
}

/// Sum `total_amount` per delivery status.
pub fn order_totals(orders: &[Order]) -> OrderTotals {
    let mut totals = OrderTotals::default();
    for order in orders {
        match order.status {
            OrderStatus::Delivered => totals.delivered += order.total_amount,
            OrderStatus::Pending => totals.pending += order.total_amount,
        }
    }
    totals
}

/// One bar of the merit-points chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeritEntry {
    pub username: String,
    pub merit_points: u64,
}

/// The merit-points series: every user holding points, in fetch order.
/// Zero-point users are filtered out rather than charted as empty bars.
pub fn merit_leaders(users: &[User]) -> Vec<MeritEntry> {
    users
        .iter()
        .filter(|user| user.merit_points > 0)
        .map(|user| MeritEntry {
            username: user.username.clone(),
            merit_points: user.merit_points,
        })
        .collect()
}
