//! Authentication and the customer's own account.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{Credentials, LoginResponse, PasswordChange, RedeemPoints, Registration};
pub use repository::{AuthRepository, HttpAuthRepository};
pub use service::{AuthService, AuthServiceError};
