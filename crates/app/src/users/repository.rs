//! Users Repository

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use sphere_core::error::GatewayError;

use crate::api::ApiClient;

use super::models::{PasswordReset, User, UserId};

/// Remote side of the admin user back-office.
///
/// Users are not a uniform CRUD resource: suspension, activation and
/// password resets are verbs of their own, so this trait stands alone
/// rather than going through [`CollectionGateway`].
///
/// [`CollectionGateway`]: sphere_core::gateway::CollectionGateway
#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Fetch every user account.
    async fn list(&self) -> Result<Vec<User>, GatewayError>;

    /// Suspend an account.
    async fn suspend(&self, id: UserId) -> Result<(), GatewayError>;

    /// Reactivate a suspended account.
    async fn activate(&self, id: UserId) -> Result<(), GatewayError>;

    /// Overwrite an account's password.
    async fn reset_password(&self, id: UserId, reset: PasswordReset)
    -> Result<(), GatewayError>;

    /// Remove an account entirely.
    async fn delete(&self, id: UserId) -> Result<(), GatewayError>;
}

#[derive(Debug, Serialize)]
struct PasswordBody {
    password: String,
}

/// REST-backed users repository.
#[derive(Debug, Clone)]
pub struct HttpUsersRepository {
    api: ApiClient,
}

impl HttpUsersRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersRepository for HttpUsersRepository {
    async fn list(&self) -> Result<Vec<User>, GatewayError> {
        self.api.get("users").await
    }

    async fn suspend(&self, id: UserId) -> Result<(), GatewayError> {
        self.api.put_unit(&format!("users/{id}/suspend")).await
    }

    async fn activate(&self, id: UserId) -> Result<(), GatewayError> {
        self.api.put_unit(&format!("users/{id}/activate")).await
    }

    async fn reset_password(
        &self,
        id: UserId,
        reset: PasswordReset,
    ) -> Result<(), GatewayError> {
        self.api
            .put_empty(
                &format!("resetpassword/{id}"),
                &PasswordBody {
                    password: reset.new_password,
                },
            )
            .await
    }

    async fn delete(&self, id: UserId) -> Result<(), GatewayError> {
        self.api.delete(&format!("registration/{id}")).await
    }
}
