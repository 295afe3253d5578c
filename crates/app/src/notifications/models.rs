//! Notification Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sphere_core::entity::Entity;

use crate::ids::TypedId;

/// Notification id
pub type NotificationId = TypedId<Notification>;

/// Notification Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub description: String,
    pub image_url: String,
    /// Display duration in minutes.
    pub timeline: i64,
    pub created_at: Timestamp,
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// New Notification draft; no client-side validation schema is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub description: String,
    pub image_url: String,
    pub timeline: i64,
}

impl Default for NewNotification {
    fn default() -> Self {
        Self {
            description: String::new(),
            image_url: String::new(),
            timeline: 60,
        }
    }
}

impl sphere_core::form::Validate for NewNotification {}
