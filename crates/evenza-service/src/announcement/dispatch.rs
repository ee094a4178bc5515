//! Fan-out row construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use evenza_entity::notification::model::{CHANNEL_IN_APP, NewNotification};
use evenza_entity::notification::NotificationStatus;

/// Outcome of one dispatch: how many delivery rows were requested
/// (resolved recipients) and how many were inserted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Delivery rows actually inserted.
    pub inserted: u64,
    /// Recipients resolved at dispatch time.
    pub requested: u64,
}

/// Expand one announcement into per-recipient delivery rows.
///
/// Every row shares the event, channel, title, message, and dispatcher;
/// the recipient set may be empty, in which case no rows are produced
/// (dispatching to nobody is not an error).
#[allow(clippy::too_many_arguments)]
pub fn build_deliveries(
    recipients: &[Uuid],
    event_id: Option<Uuid>,
    title: &str,
    message: &str,
    created_by: Option<Uuid>,
    status: NotificationStatus,
    scheduled_at: Option<DateTime<Utc>>,
    sent_at: Option<DateTime<Utc>>,
) -> Vec<NewNotification> {
    recipients
        .iter()
        .map(|&user_id| NewNotification {
            user_id,
            event_id,
            channel: CHANNEL_IN_APP.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            status,
            scheduled_at,
            created_by,
            sent_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_recipient_set_builds_no_rows() {
        let rows = build_deliveries(
            &[],
            None,
            "Reminder",
            "Doors open at 6pm",
            None,
            NotificationStatus::Sent,
            None,
            Some(Utc::now()),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_one_row_per_recipient_with_shared_fields() {
        let event = Uuid::new_v4();
        let sender = Uuid::new_v4();
        let recipients = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let now = Utc::now();

        let rows = build_deliveries(
            &recipients,
            Some(event),
            "Reminder",
            "Doors open at 6pm",
            Some(sender),
            NotificationStatus::Sent,
            None,
            Some(now),
        );

        assert_eq!(rows.len(), 3);
        for (row, recipient) in rows.iter().zip(recipients) {
            assert_eq!(row.user_id, recipient);
            assert_eq!(row.event_id, Some(event));
            assert_eq!(row.channel, CHANNEL_IN_APP);
            assert_eq!(row.title, "Reminder");
            assert_eq!(row.message, "Doors open at 6pm");
            assert_eq!(row.status, NotificationStatus::Sent);
            assert_eq!(row.created_by, Some(sender));
            assert_eq!(row.sent_at, Some(now));
        }
    }

    #[test]
    fn test_pending_rows_carry_no_sent_time() {
        let rows = build_deliveries(
            &[Uuid::new_v4()],
            None,
            "Spot available",
            "A waitlist spot opened up",
            None,
            NotificationStatus::Pending,
            None,
            None,
        );
        assert_eq!(rows[0].status, NotificationStatus::Pending);
        assert!(rows[0].sent_at.is_none());
    }
}
