//! Announcement lifecycle status.
//!
//! The announcements table and the notifications table use different label
//! vocabularies for the same lifecycle (`Draft/Scheduled/Sent` vs
//! `pending/scheduled/sent`). [`AnnouncementStatus`] is the canonical
//! internal representation; the mapping to the delivery-side vocabulary
//! lives in [`AnnouncementStatus::delivery_status`] and is the only place
//! the two are translated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::notification::NotificationStatus;

/// Lifecycle status of an announcement.
///
/// Stored verbatim (`Draft`, `Scheduled`, `Sent`) in the announcements
/// table. `Sent` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "announcement_status")]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    /// Authored but not yet scheduled or dispatched.
    Draft,
    /// Waiting for its `scheduled_at` instant; the sweep will dispatch it.
    Scheduled,
    /// Dispatched to recipients. Terminal.
    Sent,
}

impl AnnouncementStatus {
    /// Return the announcements-table label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Sent => "Sent",
        }
    }

    /// Parse a status label case-insensitively (`"Draft"`, `"draft"`,
    /// `"SENT"`, ...). Returns `None` for unknown labels.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }

    /// Map to the notifications-table status vocabulary used for delivery
    /// rows created under this lifecycle state.
    pub fn delivery_status(&self) -> NotificationStatus {
        match self {
            Self::Draft => NotificationStatus::Pending,
            Self::Scheduled => NotificationStatus::Scheduled,
            Self::Sent => NotificationStatus::Sent,
        }
    }

    /// Check if this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Check whether a transition from this status to `to` is allowed.
    ///
    /// Transitions are one-directional: draft → scheduled → sent or
    /// draft → sent. Once sent, only the (no-op) sent → sent transition
    /// is accepted.
    pub fn can_transition(&self, to: AnnouncementStatus) -> bool {
        !self.is_terminal() || to == Self::Sent
    }
}

impl fmt::Display for AnnouncementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_is_case_insensitive() {
        assert_eq!(
            AnnouncementStatus::parse_label("Draft"),
            Some(AnnouncementStatus::Draft)
        );
        assert_eq!(
            AnnouncementStatus::parse_label("draft"),
            Some(AnnouncementStatus::Draft)
        );
        assert_eq!(
            AnnouncementStatus::parse_label("SENT"),
            Some(AnnouncementStatus::Sent)
        );
        assert_eq!(
            AnnouncementStatus::parse_label(" scheduled "),
            Some(AnnouncementStatus::Scheduled)
        );
        assert_eq!(AnnouncementStatus::parse_label("published"), None);
    }

    #[test]
    fn test_delivery_status_mapping() {
        assert_eq!(
            AnnouncementStatus::Draft.delivery_status(),
            NotificationStatus::Pending
        );
        assert_eq!(
            AnnouncementStatus::Scheduled.delivery_status(),
            NotificationStatus::Scheduled
        );
        assert_eq!(
            AnnouncementStatus::Sent.delivery_status(),
            NotificationStatus::Sent
        );
    }

    #[test]
    fn test_sent_is_terminal() {
        assert!(AnnouncementStatus::Sent.can_transition(AnnouncementStatus::Sent));
        assert!(!AnnouncementStatus::Sent.can_transition(AnnouncementStatus::Draft));
        assert!(!AnnouncementStatus::Sent.can_transition(AnnouncementStatus::Scheduled));
        assert!(AnnouncementStatus::Draft.can_transition(AnnouncementStatus::Scheduled));
        assert!(AnnouncementStatus::Draft.can_transition(AnnouncementStatus::Sent));
        assert!(AnnouncementStatus::Scheduled.can_transition(AnnouncementStatus::Sent));
    }

    #[test]
    fn test_table_labels() {
        assert_eq!(AnnouncementStatus::Draft.as_str(), "Draft");
        assert_eq!(AnnouncementStatus::Scheduled.as_str(), "Scheduled");
        assert_eq!(AnnouncementStatus::Sent.as_str(), "Sent");
    }
}
