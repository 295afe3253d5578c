//! Promotional offers: finite-capacity items booked by customers.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{NewOffer, NewOfferBooking, Offer, OfferId};
pub use repository::{HttpOffersRepository, OffersRepository};
pub use service::{OffersService, OffersServiceError};
