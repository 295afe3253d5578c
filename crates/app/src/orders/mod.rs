//! Orders: checkout and the admin delivery queue.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderStatus};
pub use repository::{HttpOrdersRepository, OrdersRepository};
pub use service::{OrdersService, OrdersServiceError};
