//! Announcement entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AnnouncementStatus;

/// A message an event organizer broadcasts to registrants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    /// Unique announcement identifier.
    pub id: Uuid,
    /// The event whose registrants receive the broadcast (optional).
    pub event_id: Option<Uuid>,
    /// Announcement title.
    pub title: String,
    /// Announcement body text.
    pub message: String,
    /// Lifecycle status.
    pub status: AnnouncementStatus,
    /// When a scheduled announcement should be dispatched.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// The organizer who authored the announcement.
    pub created_by: Option<Uuid>,
    /// When the announcement was created.
    pub created_at: DateTime<Utc>,
    /// When the announcement was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the announcement was dispatched. Set exactly once, together
    /// with the transition to `Sent`.
    pub sent_at: Option<DateTime<Utc>>,
}

/// Data required to create a new announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnouncement {
    /// Target event (optional; no event means no recipients).
    pub event_id: Option<Uuid>,
    /// Announcement title.
    pub title: String,
    /// Announcement body text.
    pub message: String,
    /// Initial lifecycle status.
    pub status: AnnouncementStatus,
    /// Dispatch instant for scheduled announcements.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// The authoring organizer.
    pub created_by: Option<Uuid>,
}

/// Partial update for an existing announcement; only provided fields are
/// applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnnouncement {
    /// New target event.
    pub event_id: Option<Uuid>,
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub message: Option<String>,
    /// New lifecycle status.
    pub status: Option<AnnouncementStatus>,
    /// New dispatch instant.
    pub scheduled_at: Option<DateTime<Utc>>,
}
