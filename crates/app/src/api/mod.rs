//! HTTP boundary against the Swaggy Sphere REST backend.

mod client;

pub use client::{ApiClient, ApiConfig};
