//! Product catalog: storefront browsing and the admin product table.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{NewProduct, Product, ProductId};
pub use repository::{HttpProductsRepository, ProductsRepository};
pub use service::CatalogService;
