//! Orders Repository

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use sphere_core::error::GatewayError;

use crate::api::ApiClient;
use crate::users::models::UserId;

use super::models::{NewOrder, Order, OrderId};

/// Remote side of the orders resource.
///
/// Delivery is a verb endpoint rather than a record update, and the admin
/// table needs usernames the order payload does not carry, so this trait
/// stands alone rather than going through `CollectionGateway`.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Fetch every order.
    async fn list(&self) -> Result<Vec<Order>, GatewayError>;

    /// Place a new order.
    async fn place(&self, order: NewOrder) -> Result<Order, GatewayError>;

    /// Flip an order to delivered.
    async fn mark_delivered(&self, id: OrderId) -> Result<(), GatewayError>;

    /// Resolve the username behind an order's `user_id`.
    async fn lookup_username(&self, id: UserId) -> Result<String, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct RegisteredUser {
    username: String,
}

/// REST-backed orders repository.
#[derive(Debug, Clone)]
pub struct HttpOrdersRepository {
    api: ApiClient,
}

impl HttpOrdersRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersRepository for HttpOrdersRepository {
    async fn list(&self) -> Result<Vec<Order>, GatewayError> {
        self.api.get("orders").await
    }

    async fn place(&self, order: NewOrder) -> Result<Order, GatewayError> {
        self.api.post("orders", &order).await
    }

    async fn mark_delivered(&self, id: OrderId) -> Result<(), GatewayError> {
        self.api.put_unit(&format!("delivered/{id}")).await
    }

    async fn lookup_username(&self, id: UserId) -> Result<String, GatewayError> {
        let user: RegisteredUser = self.api.get(&format!("registration/{id}")).await?;
        Ok(user.username)
    }
}
