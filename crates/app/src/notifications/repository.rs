//! Notifications Repository

use async_trait::async_trait;
use sphere_core::{error::GatewayError, form::SubmitTarget, gateway::CollectionGateway};

use crate::api::ApiClient;

use super::models::{NewNotification, Notification, NotificationId};

/// Remote side of the notifications resource.
pub trait NotificationsRepository:
    CollectionGateway<Notification> + SubmitTarget<NewNotification, Notification>
{
}

/// REST-backed notifications repository.
#[derive(Debug, Clone)]
pub struct HttpNotificationsRepository {
    api: ApiClient,
}

impl HttpNotificationsRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CollectionGateway<Notification> for HttpNotificationsRepository {
    async fn list(&self) -> Result<Vec<Notification>, GatewayError> {
        self.api.get("notifications").await
    }

    async fn update(&self, record: Notification) -> Result<Notification, GatewayError> {
        self.api
            .put(&format!("notifications/{}", record.id), &record)
            .await
    }

    async fn delete(&self, id: NotificationId) -> Result<(), GatewayError> {
        self.api.delete(&format!("notifications/{id}")).await
    }
}

#[async_trait]
impl SubmitTarget<NewNotification, Notification> for HttpNotificationsRepository {
    async fn submit(&self, draft: NewNotification) -> Result<Notification, GatewayError> {
        self.api.post("notifications", &draft).await
    }
}

impl NotificationsRepository for HttpNotificationsRepository {}
