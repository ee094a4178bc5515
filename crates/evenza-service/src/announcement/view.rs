//! Derived announcement listing.
//!
//! The listing is a projection over in-app delivery rows rather than the
//! announcements table, because historical dispatches may predate that
//! table. Rows are grouped on `(event, title, message)`; each group
//! surfaces as one announcement with the maximum-severity status and
//! aggregate timestamps.

use std::collections::HashMap;

use uuid::Uuid;

use evenza_entity::announcement::AnnouncementView;
use evenza_entity::notification::Notification;

/// Fold in-app delivery rows into the announcement listing, ordered by
/// creation time descending.
pub fn derive_views(rows: &[Notification]) -> Vec<AnnouncementView> {
    let mut groups: HashMap<(Option<Uuid>, &str, &str), AnnouncementView> = HashMap::new();

    for row in rows {
        let key = (row.event_id, row.title.as_str(), row.message.as_str());
        match groups.get_mut(&key) {
            Some(view) => {
                view.recipients += 1;
                if row.status.severity() > view.status.delivery_status().severity() {
                    view.status = row.status.lifecycle_status();
                }
                view.created_at = view.created_at.min(row.created_at);
                view.scheduled_at = view.scheduled_at.max(row.scheduled_at);
                view.sent_at = view.sent_at.max(row.sent_at);
            }
            None => {
                groups.insert(
                    key,
                    AnnouncementView {
                        event_id: row.event_id,
                        title: row.title.clone(),
                        message: row.message.clone(),
                        status: row.status.lifecycle_status(),
                        recipients: 1,
                        created_at: row.created_at,
                        scheduled_at: row.scheduled_at,
                        sent_at: row.sent_at,
                    },
                );
            }
        }
    }

    let mut views: Vec<AnnouncementView> = groups.into_values().collect();
    views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use evenza_entity::announcement::AnnouncementStatus;
    use evenza_entity::notification::model::CHANNEL_IN_APP;
    use evenza_entity::notification::NotificationStatus;

    fn row(
        event_id: Option<Uuid>,
        title: &str,
        status: NotificationStatus,
        minutes_ago: i64,
    ) -> Notification {
        let created = Utc::now() - Duration::minutes(minutes_ago);
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            event_id,
            channel: CHANNEL_IN_APP.to_string(),
            title: title.to_string(),
            message: "body".to_string(),
            status,
            is_read: false,
            scheduled_at: None,
            created_by: None,
            attempts: 0,
            error_message: None,
            created_at: created,
            sent_at: (status == NotificationStatus::Sent).then_some(created),
        }
    }

    #[test]
    fn test_groups_by_event_title_message() {
        let event = Some(Uuid::new_v4());
        let rows = vec![
            row(event, "Reminder", NotificationStatus::Sent, 10),
            row(event, "Reminder", NotificationStatus::Sent, 10),
            row(event, "Update", NotificationStatus::Sent, 5),
        ];

        let views = derive_views(&rows);
        assert_eq!(views.len(), 2);
        let reminder = views.iter().find(|v| v.title == "Reminder").unwrap();
        assert_eq!(reminder.recipients, 2);
    }

    #[test]
    fn test_status_is_maximum_severity() {
        let event = Some(Uuid::new_v4());
        let rows = vec![
            row(event, "Reminder", NotificationStatus::Pending, 10),
            row(event, "Reminder", NotificationStatus::Sent, 10),
            row(event, "Reminder", NotificationStatus::Scheduled, 10),
        ];

        let views = derive_views(&rows);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].status, AnnouncementStatus::Sent);
    }

    #[test]
    fn test_pending_only_group_surfaces_as_draft() {
        let rows = vec![row(None, "Heads up", NotificationStatus::Pending, 1)];
        let views = derive_views(&rows);
        assert_eq!(views[0].status, AnnouncementStatus::Draft);
    }

    #[test]
    fn test_ordered_by_creation_time_descending() {
        let rows = vec![
            row(None, "Oldest", NotificationStatus::Sent, 60),
            row(None, "Newest", NotificationStatus::Sent, 1),
            row(None, "Middle", NotificationStatus::Sent, 30),
        ];

        let views = derive_views(&rows);
        let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn test_created_at_is_earliest_in_group() {
        let event = Some(Uuid::new_v4());
        let old = row(event, "Reminder", NotificationStatus::Sent, 60);
        let new = row(event, "Reminder", NotificationStatus::Sent, 1);
        let earliest = old.created_at;

        let views = derive_views(&[new, old]);
        assert_eq!(views[0].created_at, earliest);
    }
}
