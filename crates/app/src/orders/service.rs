//! Orders service.

use rustc_hash::FxHashMap;
use sphere_core::{error::GatewayError, store::RemoteCollectionStore};
use thiserror::Error;

use crate::cart::Cart;
use crate::session::Session;
use crate::users::models::UserId;

use super::{
    models::{NewOrder, Order, OrderId, OrderStatus},
    repository::OrdersRepository,
};

/// Failures from checkout and the delivery queue.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Checkout was attempted without a logged-in session; nothing was
    /// sent.
    #[error("log in to place an order")]
    NotAuthenticated,

    /// Checkout was attempted with an empty cart; nothing was sent.
    #[error("the cart is empty")]
    EmptyCart,

    /// Delivery was requested for an unknown order id.
    #[error("order not found")]
    NotFound,

    /// The request reached the backend and failed there.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub struct OrdersService<R: OrdersRepository> {
    repository: R,
    session: Option<Session>,
    store: RemoteCollectionStore<Order>,
    usernames: FxHashMap<UserId, String>,
}

impl<R: OrdersRepository> OrdersService<R> {
    /// A service acting on behalf of `session`, or anonymously with
    /// `None`.
    #[must_use]
    pub fn new(repository: R, session: Option<Session>) -> Self {
        let mut store = RemoteCollectionStore::new();
        store.declare_filter("id", |o: &Order| o.id.to_string());

        Self {
            repository,
            session,
            store,
            usernames: FxHashMap::default(),
        }
    }

    /// Fetch all orders, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local list is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        let fetched = self.repository.list().await;
        self.store.ingest(fetched)
    }

    /// Resolve the username behind each loaded order.
    ///
    /// Lookups that fail are logged and skipped; the table simply shows a
    /// blank for those rows.
    pub async fn load_usernames(&mut self) {
        let ids: Vec<UserId> = self
            .store
            .items()
            .iter()
            .map(|order| order.user_id)
            .filter(|id| !self.usernames.contains_key(id))
            .collect();

        for id in ids {
            match self.repository.lookup_username(id).await {
                Ok(username) => {
                    self.usernames.insert(id, username);
                }
                Err(error) => {
                    tracing::warn!(user_id = %id, error = %error, "username lookup failed");
                }
            }
        }
    }

    /// All orders in fetch order.
    pub fn orders(&self) -> &[Order] {
        self.store.items()
    }

    /// The filtered projection.
    pub fn view(&self) -> Vec<&Order> {
        self.store.view()
    }

    /// Search by order-id substring. The base collection is untouched, so
    /// clearing the query restores the full table.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_filter("id", term);
    }

    /// The resolved username for an order's owner, if the lookup landed.
    pub fn username(&self, id: UserId) -> Option<&str> {
        self.usernames.get(&id).map(String::as_str)
    }

    /// Place an order for the cart's contents.
    ///
    /// Requires a logged-in session and a non-empty cart; neither failure
    /// produces a request. The cart is left intact either way — clearing
    /// it is the caller's decision.
    ///
    /// # Errors
    ///
    /// [`OrdersServiceError::NotAuthenticated`], [`OrdersServiceError::EmptyCart`],
    /// or the gateway failure.
    pub async fn place(&self, cart: &Cart) -> Result<Order, OrdersServiceError> {
        if self.session.is_none() {
            return Err(OrdersServiceError::NotAuthenticated);
        }
        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let order = self.repository.place(NewOrder::from(cart)).await?;
        Ok(order)
    }

    /// Flip an order to delivered, optimistically.
    ///
    /// The local row flips first; a failed request replays the snapshot.
    ///
    /// # Errors
    ///
    /// [`OrdersServiceError::NotFound`] locally, or the gateway failure
    /// after the revert.
    pub async fn mark_delivered(&mut self, id: OrderId) -> Result<(), OrdersServiceError> {
        let snapshot = self
            .store
            .get(id)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)?;

        let mut updated = snapshot.clone();
        updated.status = OrderStatus::Delivered;
        self.store.apply_update(updated);

        match self.repository.mark_delivered(id).await {
            Ok(()) => Ok(()),
            Err(error) => {
                self.store.apply_update(snapshot);
                Err(error.into())
            }
        }
    }
}
