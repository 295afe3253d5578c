//! Offer Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sphere_core::entity::Entity;

use crate::ids::TypedId;

/// Offer id
pub type OfferId = TypedId<Offer>;

/// Offer Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub offer_name: String,
    pub description: String,
    pub offer_price: Decimal,
    /// Offer duration in minutes.
    pub timeline: i64,
    pub image_url: String,
    pub insta_url: Option<String>,
    /// Remaining bookable slots. Booking is blocked at zero.
    pub slots_limit: u32,
    pub rating: u8,
}

impl Offer {
    /// Whether a booking action may be offered at all.
    pub fn bookable(&self) -> bool {
        self.slots_limit > 0
    }
}

impl Entity for Offer {
    type Id = OfferId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// New Offer draft; no client-side validation schema is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    pub offer_name: String,
    pub description: String,
    pub offer_price: Decimal,
    pub timeline: i64,
    pub image_url: String,
    pub insta_url: Option<String>,
    pub slots_limit: u32,
    pub rating: u8,
}

impl Default for NewOffer {
    fn default() -> Self {
        Self {
            offer_name: String::new(),
            description: String::new(),
            offer_price: Decimal::ZERO,
            timeline: 60,
            image_url: String::new(),
            insta_url: None,
            slots_limit: 0,
            rating: 1,
        }
    }
}

impl sphere_core::form::Validate for NewOffer {}

/// Booking request for one offer slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOfferBooking {
    pub offer_id: OfferId,
}
