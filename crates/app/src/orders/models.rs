//! Order Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sphere_core::entity::Entity;

use crate::cart::Cart;
use crate::catalog::ProductId;
use crate::ids::TypedId;
use crate::users::models::UserId;

/// Order id
pub type OrderId = TypedId<Order>;

/// Delivery status. The wire carries it as a boolean, delivered = `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum OrderStatus {
    Pending,
    Delivered,
}

impl From<bool> for OrderStatus {
    fn from(delivered: bool) -> Self {
        if delivered { Self::Delivered } else { Self::Pending }
    }
}

impl From<OrderStatus> for bool {
    fn from(status: OrderStatus) -> Self {
        status == OrderStatus::Delivered
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One line of an order being placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Checkout payload: the cart reduced to product ids and quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_items: Vec<NewOrderItem>,
}

impl From<&Cart> for NewOrder {
    fn from(cart: &Cart) -> Self {
        Self {
            order_items: cart
                .lines()
                .iter()
                .map(|line| NewOrderItem {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}
