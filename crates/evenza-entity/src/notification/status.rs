//! Notification delivery status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::announcement::AnnouncementStatus;

/// Delivery status of a notification row.
///
/// Stored lowercase (`pending`, `scheduled`, `sent`) in the notifications
/// table — a different vocabulary than the announcements table, kept for
/// compatibility with historical rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Created but not dispatched.
    Pending,
    /// Waiting for a scheduled dispatch.
    Scheduled,
    /// Delivered.
    Sent,
}

impl NotificationStatus {
    /// Return the notifications-table label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
        }
    }

    /// Severity rank used when aggregating a group of delivery rows into
    /// a single announcement view (`sent` > `scheduled` > `pending`).
    pub fn severity(&self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Scheduled => 2,
            Self::Sent => 3,
        }
    }

    /// Map back to the announcement lifecycle vocabulary. `pending` rows
    /// surface as drafts in the derived listing.
    pub fn lifecycle_status(&self) -> AnnouncementStatus {
        match self {
            Self::Pending => AnnouncementStatus::Draft,
            Self::Scheduled => AnnouncementStatus::Scheduled,
            Self::Sent => AnnouncementStatus::Sent,
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(NotificationStatus::Sent.severity() > NotificationStatus::Scheduled.severity());
        assert!(NotificationStatus::Scheduled.severity() > NotificationStatus::Pending.severity());
    }

    #[test]
    fn test_lifecycle_mapping() {
        assert_eq!(
            NotificationStatus::Pending.lifecycle_status(),
            AnnouncementStatus::Draft
        );
        assert_eq!(
            NotificationStatus::Scheduled.lifecycle_status(),
            AnnouncementStatus::Scheduled
        );
        assert_eq!(
            NotificationStatus::Sent.lifecycle_status(),
            AnnouncementStatus::Sent
        );
    }

    #[test]
    fn test_round_trip_with_announcement_vocabulary() {
        for status in [
            AnnouncementStatus::Draft,
            AnnouncementStatus::Scheduled,
            AnnouncementStatus::Sent,
        ] {
            assert_eq!(status.delivery_status().lifecycle_status(), status);
        }
    }
}
