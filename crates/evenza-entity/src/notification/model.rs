//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::NotificationStatus;

/// Delivery channel for in-app notifications. The only channel modeled.
pub const CHANNEL_IN_APP: &str = "in-app";

/// One recipient's delivery record for a dispatched announcement (or an
/// ad-hoc system message).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// The event the message relates to (optional).
    pub event_id: Option<Uuid>,
    /// Delivery channel; only `in-app` is modeled.
    pub channel: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Delivery status.
    pub status: NotificationStatus,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// Scheduled dispatch instant (if the dispatch was scheduled).
    pub scheduled_at: Option<DateTime<Utc>>,
    /// The user who triggered the dispatch.
    pub created_by: Option<Uuid>,
    /// Delivery attempt counter. Present for schema compatibility with
    /// historical rows; no dispatch path increments it.
    pub attempts: i32,
    /// Last delivery error (schema compatibility; never written).
    pub error_message: Option<String>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was delivered.
    pub sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Check if the notification is unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data for one delivery row created at fan-out time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: Uuid,
    /// The event the message relates to (optional).
    pub event_id: Option<Uuid>,
    /// Delivery channel.
    pub channel: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Delivery status.
    pub status: NotificationStatus,
    /// Scheduled dispatch instant (if any).
    pub scheduled_at: Option<DateTime<Utc>>,
    /// The dispatching user.
    pub created_by: Option<Uuid>,
    /// Delivery time for rows created already-sent.
    pub sent_at: Option<DateTime<Utc>>,
}
