//! Derived announcement listing view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::AnnouncementStatus;

/// One row of the announcement listing.
///
/// Derived by grouping in-app notification rows on
/// `(event, title, message)` rather than read from the announcements
/// table, because historical dispatches may predate that table. Status is
/// the maximum severity across the group; timestamps are group aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementView {
    /// The event the broadcast targeted (if any).
    pub event_id: Option<Uuid>,
    /// Announcement title.
    pub title: String,
    /// Announcement body text.
    pub message: String,
    /// Aggregate lifecycle status of the group.
    pub status: AnnouncementStatus,
    /// Number of delivery rows in the group.
    pub recipients: u64,
    /// Earliest creation time across the group.
    pub created_at: DateTime<Utc>,
    /// Latest scheduled time across the group (if any).
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Latest dispatch time across the group (if any).
    pub sent_at: Option<DateTime<Utc>>,
}
