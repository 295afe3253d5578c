//! Offers Repository

use async_trait::async_trait;
use sphere_core::{error::GatewayError, form::SubmitTarget, gateway::CollectionGateway};

use crate::api::ApiClient;

use super::models::{NewOffer, NewOfferBooking, Offer, OfferId};

/// Remote side of the offers resource, plus the booking endpoint.
#[async_trait]
pub trait OffersRepository: CollectionGateway<Offer> + SubmitTarget<NewOffer, Offer> {
    /// Consume one slot of an offer.
    async fn book(&self, booking: NewOfferBooking) -> Result<(), GatewayError>;
}

/// REST-backed offers repository.
#[derive(Debug, Clone)]
pub struct HttpOffersRepository {
    api: ApiClient,
}

impl HttpOffersRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CollectionGateway<Offer> for HttpOffersRepository {
    async fn list(&self) -> Result<Vec<Offer>, GatewayError> {
        self.api.get("offers").await
    }

    async fn update(&self, record: Offer) -> Result<Offer, GatewayError> {
        self.api.put(&format!("offers/{}", record.id), &record).await
    }

    async fn delete(&self, id: OfferId) -> Result<(), GatewayError> {
        self.api.delete(&format!("offers/{id}")).await
    }
}

#[async_trait]
impl SubmitTarget<NewOffer, Offer> for HttpOffersRepository {
    async fn submit(&self, draft: NewOffer) -> Result<Offer, GatewayError> {
        self.api.post("offers", &draft).await
    }
}

#[async_trait]
impl OffersRepository for HttpOffersRepository {
    async fn book(&self, booking: NewOfferBooking) -> Result<(), GatewayError> {
        self.api.post_empty("offerbookings", &booking).await
    }
}
