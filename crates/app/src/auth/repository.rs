//! Auth Repository

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use sphere_core::error::GatewayError;

use crate::api::ApiClient;
use crate::users::models::User;

use super::models::{Credentials, LoginResponse, PasswordChange, RedeemPoints, Registration};

/// Remote side of authentication and the customer's own account.
#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchange credentials for a session blob.
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse, GatewayError>;

    /// Create a new account.
    async fn register(&self, registration: Registration) -> Result<User, GatewayError>;

    /// Fetch the logged-in user's profile.
    async fn profile(&self) -> Result<User, GatewayError>;

    /// Change the logged-in user's password.
    async fn change_password(&self, change: PasswordChange) -> Result<(), GatewayError>;

    /// Redeem merit points from the logged-in user's balance.
    async fn redeem(&self, redemption: RedeemPoints) -> Result<(), GatewayError>;

    /// Remove the logged-in user's account.
    async fn delete_account(&self) -> Result<(), GatewayError>;
}

#[derive(Debug, Serialize)]
struct PasswordChangeBody {
    old_password: String,
    new_password: String,
}

#[derive(Debug, Serialize)]
struct RegistrationBody {
    username: String,
    email: String,
    phone: String,
    password: String,
}

/// REST-backed auth repository.
#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    api: ApiClient,
}

impl HttpAuthRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse, GatewayError> {
        self.api.post("login", &credentials).await
    }

    async fn register(&self, registration: Registration) -> Result<User, GatewayError> {
        // The confirmation field never crosses the wire.
        let body = RegistrationBody {
            username: registration.username,
            email: registration.email,
            phone: registration.phone,
            password: registration.password,
        };
        self.api.post("registration", &body).await
    }

    async fn profile(&self) -> Result<User, GatewayError> {
        // The profile endpoint answers with a one-element list.
        let mut profiles: Vec<User> = self.api.get("profile").await?;
        if profiles.is_empty() {
            return Err(GatewayError::Rejected {
                status: 404,
                message: "profile not found".to_string(),
            });
        }
        Ok(profiles.swap_remove(0))
    }

    async fn change_password(&self, change: PasswordChange) -> Result<(), GatewayError> {
        let body = PasswordChangeBody {
            old_password: change.old_password,
            new_password: change.new_password,
        };
        self.api.put_empty("changepassword", &body).await
    }

    async fn redeem(&self, redemption: RedeemPoints) -> Result<(), GatewayError> {
        self.api.put_empty("redeemmeritpoints", &redemption).await
    }

    async fn delete_account(&self) -> Result<(), GatewayError> {
        self.api.delete("deleteaccount").await
    }
}
