//! Notifications: announcements pushed to the storefront.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{NewNotification, Notification, NotificationId};
pub use repository::{HttpNotificationsRepository, NotificationsRepository};
pub use service::NotificationsService;
