//! Products Repository

use async_trait::async_trait;
use sphere_core::{error::GatewayError, form::SubmitTarget, gateway::CollectionGateway};

use crate::api::ApiClient;

use super::models::{NewProduct, Product, ProductId};

/// Remote side of the product catalog.
///
/// The collection operations come from [`CollectionGateway`]; creation is
/// the [`SubmitTarget`] of the admin "add product" form.
pub trait ProductsRepository:
    CollectionGateway<Product> + SubmitTarget<NewProduct, Product>
{
}

/// REST-backed products repository.
#[derive(Debug, Clone)]
pub struct HttpProductsRepository {
    api: ApiClient,
}

impl HttpProductsRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CollectionGateway<Product> for HttpProductsRepository {
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        self.api.get("products").await
    }

    async fn update(&self, record: Product) -> Result<Product, GatewayError> {
        self.api
            .put(&format!("products/{}", record.id), &record)
            .await
    }

    async fn delete(&self, id: ProductId) -> Result<(), GatewayError> {
        self.api.delete(&format!("products/{id}")).await
    }
}

#[async_trait]
impl SubmitTarget<NewProduct, Product> for HttpProductsRepository {
    async fn submit(&self, draft: NewProduct) -> Result<Product, GatewayError> {
        self.api.post("products", &draft).await
    }
}

impl ProductsRepository for HttpProductsRepository {}
