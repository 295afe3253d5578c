//! Product Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sphere_core::entity::Entity;

use crate::ids::TypedId;

/// Product id
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub insta_url: Option<String>,
    /// 1–5 star rating.
    pub rating: u8,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// New Product draft. Seeded with empty fields and a one-star rating;
/// catalog create forms declare no validation schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub insta_url: Option<String>,
    pub rating: u8,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            category: String::new(),
            image_url: String::new(),
            insta_url: None,
            rating: 1,
        }
    }
}

impl sphere_core::form::Validate for NewProduct {}
